//! Outreach link construction for the card buttons.

/// Click-to-chat link; WhatsApp wants digits only.
pub fn whatsapp_link(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}", digits)
}

pub fn mailto_link(email: &str) -> String {
    format!("mailto:{}", email)
}

pub fn maps_link(address: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(address)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_link_strips_formatting() {
        assert_eq!(
            whatsapp_link("+55 (11) 99999-9999"),
            "https://wa.me/5511999999999"
        );
    }

    #[test]
    fn maps_link_escapes_the_address() {
        assert_eq!(
            maps_link("Av. Paulista, 100"),
            "https://www.google.com/maps/search/?api=1&query=Av.%20Paulista%2C%20100"
        );
    }
}
