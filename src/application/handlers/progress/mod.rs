//! Quiz and learning progress commands.

mod complete_section;
mod mark_section_learned;
mod submit_answer;

pub use complete_section::{
    CompleteSectionCommand, CompleteSectionHandler, CompleteSectionResult,
};
pub use mark_section_learned::{MarkSectionLearnedCommand, MarkSectionLearnedHandler};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
