pub mod ai;
pub mod documents;
pub mod error;
pub mod photo;
pub mod pipeline;
pub mod qr;
pub mod scanner;
pub mod sheets;
pub mod traits;

pub use ai::{AiConfig, GeminiClient, OfflineCollaborator, collaborator_from_config};
pub use documents::DocumentKind;
pub use error::{CollaboratorError, DocumentError, QrError, RegistrationError, Result, ScanError};
pub use photo::{PhotoEnhancement, PhotoPayload, enhance_or_original};
pub use pipeline::{RegistrationPipeline, Submission};
pub use qr::PngQrEncoder;
pub use scanner::{Camera, FrameSource, ImageFileCamera, QrScanner, ScanOutcome, check_in_scanned};
pub use sheets::{DeliveryOutcome, SheetEndpoint, WebhookSheetSink};
pub use traits::{AiCollaborator, QrEncoder, SheetSink};
