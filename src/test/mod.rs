
mod message;
mod post;
mod user;
