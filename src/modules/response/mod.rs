pub mod chat;
pub mod page;
pub mod recommendations;

pub use chat::chat_response;
pub use page::Page;
pub use recommendations::{recommendations_for, Recommendations};
