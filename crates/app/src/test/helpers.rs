//! Test Helpers

use zeroize::Zeroizing;

use crate::{
    auth::NewUser,
    domain::{addresses::data::NewAddress, sneakers::data::NewSneaker},
};

pub(crate) const TEST_PASSWORD: &str = "password123";

pub(crate) fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: Zeroizing::new(TEST_PASSWORD.to_string()),
        name: Some("Test Customer".to_string()),
        mobile: Some("+6281234567890".to_string()),
    }
}

pub(crate) fn new_address(label: &str) -> NewAddress {
    NewAddress {
        label: label.to_string(),
        line: "Jl. Braga No. 10".to_string(),
        city: "Bandung".to_string(),
        district: "Sumur Bandung".to_string(),
        subdistrict: "Braga".to_string(),
        state: "Jawa Barat".to_string(),
    }
}

pub(crate) fn new_sneaker(brand: &str, color: &str) -> NewSneaker {
    NewSneaker {
        brand: brand.to_string(),
        color: color.to_string(),
        image_url: None,
    }
}
