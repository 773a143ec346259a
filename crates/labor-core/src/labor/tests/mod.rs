mod common;
mod resource;
mod status;
