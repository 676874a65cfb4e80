// Interface adapters: outbound encoding and scripted input sources.

pub mod bots;
pub mod protocol;
pub mod serializer;
