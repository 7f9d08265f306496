//! Vendor dispatch.
//!
//! Picks the dialect parser for the declared vendor and stamps the result
//! with the vendor and the raw configuration text. Parsers never fail: junk
//! input produces a mostly-empty `DeviceConfig`, not an error.

use crate::model::{DeviceConfig, Vendor};
use crate::{cisco, h3c, huawei, juniper};

pub fn parse_config(text: &str, vendor: Vendor) -> DeviceConfig {
    let mut device = match vendor {
        Vendor::Cisco => cisco::parse(text),
        Vendor::Huawei => huawei::parse(text),
        Vendor::Juniper => juniper::parse(text),
        Vendor::H3c => h3c::parse(text),
    };
    device.vendor = vendor;
    device.raw_config = text.to_string();
    device
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_config;
    use crate::model::Vendor;

    #[test]
    fn keeps_raw_text_and_vendor() {
        let text = "hostname SW1\n!\n";
        let device = parse_config(text, Vendor::Cisco);
        assert_eq!(device.vendor, Vendor::Cisco);
        assert_eq!(device.raw_config, text);
        assert_eq!(device.hostname, "SW1");
    }

    #[test]
    fn junk_input_yields_empty_device() {
        let device = parse_config("complete nonsense\nnot a config\n", Vendor::Juniper);
        assert!(device.ports.is_empty());
        assert!(device.vlans.is_empty());
        assert_eq!(device.hostname, "");
    }

    #[test]
    fn same_text_different_vendor_differs() {
        let text = "sysname EDGE\n#\n";
        assert_eq!(parse_config(text, Vendor::Huawei).hostname, "EDGE");
        assert_eq!(parse_config(text, Vendor::Cisco).hostname, "");
    }
}
