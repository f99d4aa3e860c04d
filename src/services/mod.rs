pub mod application_page_service;
pub mod config_service;
pub mod secret_service;
pub mod user_service;
pub mod workspace_service;

pub use application_page_service::ApplicationPageService;
pub use config_service::{ConfigService, TEMPLATE_WORKSPACE_ID_KEY};
pub use secret_service::{Base64SecretCodec, SecretDecryptor, SecretError};
pub use user_service::UserService;
pub use workspace_service::WorkspaceService;
