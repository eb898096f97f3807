//! Course catalog: modules, sections, questions, and learning content.

mod learning_content;
mod module;
mod question;
mod section;

pub use learning_content::LearningContent;
pub use module::{validate_names, Module};
pub use question::{
    validate_question_fields, AnswerOutcome, Question, QuestionOptions,
    QUESTION_TYPE_MULTIPLE_CHOICE,
};
pub use section::Section;
