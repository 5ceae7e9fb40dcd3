//! Numeric error codes
//!
//! The thousands digit names the area (see [`ErrorCategory`](super::ErrorCategory)):
//! general below 1000, then auth, permission, supplier, report, registry
//! lookup, upload, and 9xxx for failures on our side or the managed backend's.
//!
//! Codes travel as bare numbers in the error envelope. The web client only
//! looks at the number; `message()` is the text shown when the handler has
//! nothing more specific to say. User-facing messages are in Portuguese.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $name:ident = $value:literal => $message:literal, )+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$doc])* $name = $value, )+
        }

        impl ErrorCode {
            /// Fallback text for the envelope's `message`
            pub const fn message(&self) -> &'static str {
                match self {
                    $( Self::$name => $message, )+
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(Self::$name), )+
                    other => Err(InvalidErrorCode(other)),
                }
            }
        }
    };
}

error_codes! {
    ValidationFailed = 2 => "Dados inválidos.",
    InvalidRequest = 5 => "Requisição inválida.",
    RequiredField = 7 => "Campo obrigatório não preenchido.",

    NotAuthenticated = 1001 => "Faça login para continuar.",
    InvalidCredentials = 1002 => "Invalid email or password",
    TokenExpired = 1003 => "Sessão expirada. Faça login novamente.",
    TokenInvalid = 1004 => "Sessão inválida. Faça login novamente.",
    /// Profile exists but has not been approved yet
    AccountPending = 1005 => "Cadastro pendente: aguarde aprovação ou insira o código correto.",
    /// Sign-up code maps to no role
    InvalidAccessCode = 1006 => "Código inválido! Busque seu código com o administrador.",
    /// Signed in, but the profile row is missing or carries an unknown role
    ProfileNotFound = 1007 => "Perfil não encontrado.",

    AdminRequired = 2003 => "Acesso restrito a administradores.",

    SupplierNotFound = 3001 => "Fornecedor não encontrado.",
    /// WhatsApp number without 10 or 11 digits
    InvalidPhone = 3002 => "Número de WhatsApp inválido. Use o formato: 85996204919",
    DuplicatePhone = 3003 => "Este número de WhatsApp já está cadastrado.",
    /// Bulk action with nothing selected
    EmptySelection = 3004 => "Nenhum fornecedor selecionado.",

    ReportNotFound = 4001 => "Denúncia não encontrada.",

    InvalidCnpj = 5001 => "CNPJ inválido.",
    CnpjNotFound = 5002 => "CNPJ não encontrado.",
    /// Registry unreachable, or it answered with something unreadable
    LookupUnavailable = 5005 => "Serviço de consulta indisponível. Tente novamente.",

    FileTooLarge = 6501 => "Arquivo muito grande.",
    UnsupportedFileFormat = 6502 => "Formato de arquivo não suportado.",
    /// Bytes that do not decode as an image
    InvalidImageFile = 6503 => "Imagem inválida.",
    NoFileProvided = 6504 => "Nenhum arquivo enviado.",
    EmptyFile = 6505 => "Arquivo vazio.",
    ImageProcessingFailed = 6508 => "Falha ao processar a imagem.",
    FileStorageFailed = 6509 => "Falha ao salvar o arquivo.",

    InternalError = 9001 => "Erro interno.",
    /// Backend reply we could not decode
    DatabaseError = 9002 => "Erro no banco de dados.",
    /// Backend unreachable
    NetworkError = 9003 => "Falha de conexão com o servidor.",
    /// Backend reachable but refused the call
    RemoteServiceError = 9006 => "Erro no serviço remoto.",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code(), f)
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number with no matching [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code {0}")]
pub struct InvalidErrorCode(pub u16);
