pub mod auth;
pub mod question;
pub mod response;

pub use auth::{
    AdminCredentials, AdminLoginResponse, ParticipantCredentials, ParticipantLoginResponse,
    ParticipantProfile,
};
pub use question::{NewQuestion, Question, QuestionType, SetActiveRequest, SubmitAnswer};
pub use response::{QuestionSummary, Respondent, Response};
