mod arguments;
mod closures;
mod errors;
mod natives;
mod quasiquote;
mod reader;
mod special_forms;
mod tail_calls;
