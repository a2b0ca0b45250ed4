//! Use cases of the MockMate client.
//!
//! Services depend only on the interfaces in `mockmate-core`; the CLI wires
//! them to the HTTP and WebSocket adapters of `mockmate-interaction`.

pub mod account;
pub mod cv_upload;
pub mod finalizer;
pub mod jobs;
pub mod practice;
pub mod session_client;

pub use account::AccountService;
pub use cv_upload::CvUploadForm;
pub use finalizer::{FinalizeRequest, ResultFinalizer};
pub use jobs::JobCatalog;
pub use practice::{AnswerOutcome, PracticeInterview};
pub use session_client::{MessageHandler, SessionClient, TokenProvider};
