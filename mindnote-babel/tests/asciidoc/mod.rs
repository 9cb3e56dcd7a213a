mod outline;
mod visitor;
