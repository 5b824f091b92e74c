mod arithmetic;
mod reader;
