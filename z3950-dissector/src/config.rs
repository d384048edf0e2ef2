use z3950_transcoder::context::DecoderOptions;

/// The protocols a dissector tells apart by port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Z3950,
    Pdc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DissectorConfig {
    pub z3950_ports: Vec<u16>,
    /// No well known port, the host assigns them
    pub pdc_ports: Vec<u16>,
    /// Reassemble messages that span several segments
    pub desegment: bool,
    /// Longest message a framer buffers before dropping it
    pub max_message_length: usize,
    pub decoder: DecoderOptions,
}

impl Default for DissectorConfig {
    fn default() -> Self {
        DissectorConfig {
            z3950_ports: vec![210],
            pdc_ports: Vec::new(),
            desegment: true,
            max_message_length: 1 << 24,
            decoder: DecoderOptions::default(),
        }
    }
}

impl DissectorConfig {
    pub fn z3950_ports(mut self, ports: impl Into<Vec<u16>>) -> DissectorConfig {
        self.z3950_ports = ports.into();
        self
    }

    pub fn pdc_ports(mut self, ports: impl Into<Vec<u16>>) -> DissectorConfig {
        self.pdc_ports = ports.into();
        self
    }

    pub fn desegment(mut self, desegment: bool) -> DissectorConfig {
        self.desegment = desegment;
        self
    }

    pub fn max_message_length(mut self, length: usize) -> DissectorConfig {
        self.max_message_length = length;
        self
    }

    pub fn decoder(mut self, options: DecoderOptions) -> DissectorConfig {
        self.decoder = options;
        self
    }

    pub fn handles_port(&self, protocol: Protocol, port: u16) -> bool {
        match protocol {
            Protocol::Z3950 => self.z3950_ports.contains(&port),
            Protocol::Pdc => self.pdc_ports.contains(&port),
        }
    }

    /// The protocol attached to `port`, Z39.50 taking precedence.
    pub fn protocol_for_port(&self, port: u16) -> Option<Protocol> {
        [Protocol::Z3950, Protocol::Pdc]
            .into_iter()
            .find(|protocol| self.handles_port(*protocol, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_z3950_to_its_registered_port() {
        let config = DissectorConfig::default();
        assert!(config.handles_port(Protocol::Z3950, 210));
        assert!(!config.handles_port(Protocol::Pdc, 210));
        assert_eq!(config.protocol_for_port(210), Some(Protocol::Z3950));
        assert_eq!(config.protocol_for_port(4000), None);
    }

    #[test]
    fn builds_custom_configurations() {
        let config = DissectorConfig::default()
            .pdc_ports([4000, 4001])
            .desegment(false)
            .max_message_length(4096)
            .decoder(DecoderOptions::default().max_depth(8));
        assert_eq!(config.protocol_for_port(4001), Some(Protocol::Pdc));
        assert!(!config.desegment);
        assert_eq!(config.max_message_length, 4096);
        assert_eq!(config.decoder.max_depth, 8);
    }
}
