//! Error types and handling for the `MamaeZen` service

use thiserror::Error;

/// Main error type for the `MamaeZen` application
#[derive(Error, Debug)]
pub enum MamaeZenError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Generative AI service communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Preference store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A device capability was refused by the user
    #[error("Permission denied: {message}")]
    Permission { message: String },

    /// An operation was requested from a state that does not allow it
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl MamaeZenError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new permission error
    pub fn permission<S: Into<String>>(message: S) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create a new invalid state error
    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly message, in the language the app speaks
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MamaeZenError::Config { .. } => {
                "Erro de configuração. Verifique o arquivo de configuração e a chave da API."
                    .to_string()
            }
            MamaeZenError::Api { .. } => {
                "Não foi possível falar com o serviço agora. Verifique sua conexão.".to_string()
            }
            MamaeZenError::Validation { message } => format!("Entrada inválida: {message}"),
            MamaeZenError::Storage { .. } => {
                "Não foi possível salvar seus dados neste dispositivo.".to_string()
            }
            MamaeZenError::Permission { message } => message.clone(),
            MamaeZenError::InvalidState { message } => message.clone(),
            MamaeZenError::Io { .. } => {
                "Falha ao acessar um arquivo. Verifique as permissões.".to_string()
            }
            MamaeZenError::General { message } => message.clone(),
        }
    }
}
