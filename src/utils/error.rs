use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Excel export error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input file has no header row")]
    EmptyInput,

    #[error("Required column '{column}' not found in input")]
    MissingColumn { column: String },

    #[error("Upload error: {message}")]
    UploadError { message: String },

    #[error("Upload exceeds the configured size limit")]
    UploadTooLarge,

    #[error("File not found in storage: {path}")]
    NotFound { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    Export,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ValidatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidatorError::CsvError(_)
            | ValidatorError::EmptyInput
            | ValidatorError::MissingColumn { .. }
            | ValidatorError::UploadError { .. }
            | ValidatorError::UploadTooLarge => ErrorCategory::Input,
            ValidatorError::ConfigError { .. }
            | ValidatorError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            ValidatorError::XlsxError(_) => ErrorCategory::Export,
            ValidatorError::IoError(_) | ValidatorError::NotFound { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Export => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the caller sent something wrong, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Message shown to the person using the tool.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ValidatorError::CsvError(e) => format!("Não foi possível ler o CSV: {}", e),
            ValidatorError::EmptyInput => "O arquivo enviado está vazio.".to_string(),
            ValidatorError::MissingColumn { column } => {
                format!("A coluna obrigatória \"{}\" não foi encontrada no arquivo.", column)
            }
            ValidatorError::UploadError { message } => message.clone(),
            ValidatorError::UploadTooLarge => {
                "O arquivo excede o tamanho máximo permitido para envio.".to_string()
            }
            ValidatorError::XlsxError(_) => "Falha ao gerar o arquivo de resultado.".to_string(),
            ValidatorError::ConfigError { .. }
            | ValidatorError::InvalidConfigValueError { .. } => {
                format!("Configuração inválida: {}", self)
            }
            ValidatorError::IoError(e) => format!("Erro de leitura/escrita: {}", e),
            ValidatorError::NotFound { path } => format!("Arquivo não encontrado: {}", path),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ValidatorError::CsvError(_) | ValidatorError::EmptyInput => {
                "Exporte o balancete novamente em CSV separado por ponto e vírgula (;)."
            }
            ValidatorError::MissingColumn { .. } => {
                "Confira se o cabeçalho contém Máscara, Descrição, Saldo Atual e Tipo Saldo."
            }
            ValidatorError::UploadError { .. } => "Selecione um arquivo .csv e envie novamente.",
            ValidatorError::UploadTooLarge => {
                "Envie um arquivo menor ou aumente server.max_upload_mb na configuração."
            }
            ValidatorError::XlsxError(_) => {
                "Tente novamente; se persistir, verifique a memória disponível."
            }
            ValidatorError::ConfigError { .. }
            | ValidatorError::InvalidConfigValueError { .. } => {
                "Revise o arquivo de configuração TOML e os argumentos da linha de comando."
            }
            ValidatorError::IoError(_) | ValidatorError::NotFound { .. } => {
                "Verifique o caminho informado e as permissões do diretório."
            }
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
