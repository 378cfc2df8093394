mod error;
mod org;
mod question;
mod submission;

pub use error::{CoreError, Result};
pub use org::{OrgTree, Reportees};
pub use question::{OPTION_COUNT, Question, QuestionBank};
pub use submission::{Distance, FeedbackSubmission, RecipientPayload, SubmissionPeriod};
