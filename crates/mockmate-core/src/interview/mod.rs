//! Interview domain module.
//!
//! # Module Structure
//!
//! - `message`: Transcript entry types (`MessageKind`, `Sender`, `TranscriptMessage`)
//! - `transcript`: The ordered transcript store (`Transcript`, `Ticket`)
//! - `frame`: Channel wire frames (`ClientFrame`, `decode_server_frame`)
//! - `evaluation`: REST flow questions and evaluations
//! - `result`: Final decision (`InterviewResult`)

mod evaluation;
mod frame;
mod message;
mod result;
mod transcript;

pub use evaluation::{Difficulty, Evaluation, Question, ScoreBand};
pub use frame::{ClientFrame, ClientFrameType, FrameRejection, decode_server_frame};
pub use message::{MessageKind, NewMessage, Sender, TranscriptMessage};
pub use result::{Decision, InterviewResult};
pub use transcript::{Ticket, Transcript};
