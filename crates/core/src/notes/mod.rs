//! Notes module - analyst notes per deal and framework.

mod notes_model;
mod notes_service;
mod notes_traits;
mod sink;


pub use notes_model::{NewNote, Note};
pub use notes_service::NoteService;
pub use notes_traits::{NoteServiceTrait, NoteSinkTrait};
pub use sink::InMemoryNoteSink;
