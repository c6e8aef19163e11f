pub mod chat;
pub mod material;
pub mod stage;
pub mod subject;
