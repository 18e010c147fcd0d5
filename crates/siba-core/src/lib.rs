pub mod resolver;
pub mod rules;
pub mod conversation;
pub mod markup;
pub mod event_bus;
pub mod ports;
pub mod responder;
pub mod startup;

#[cfg(test)]
mod tests;
