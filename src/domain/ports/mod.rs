mod audio_port;
mod configurator_port;
mod connector_port;
mod translator_port;

pub use audio_port::{AudioPort, Sound, SoundGroup};
pub use configurator_port::{ConfiguratorPort, keys};
pub use connector_port::{Connector, ProtocolFactory};
pub use translator_port::TranslatorPort;

#[cfg(test)]
pub use connector_port::MockProtocolFactory;
