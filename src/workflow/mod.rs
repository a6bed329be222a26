pub mod admin_board;
pub mod auth;
pub mod participant;
pub mod submission;

pub use admin_board::{load_responses, AdminBoard, QuestionForm};
pub use participant::{
    apply_active_question, confirm_and_submit, refresh_active_question, send_submission,
};
pub use submission::{
    Completion, Draft, FlowState, PressOutcome, QuestionChange, SubmissionFlow, SubmitOutcome,
    SubmitRequest, SubmitTicket,
};
