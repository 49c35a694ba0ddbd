pub mod chat;
pub mod order;
pub mod push;
pub mod track;
