//! Membrete del operador
//!
//! Datos fijos impresos en la cabecera del LR y en la firma de los emails.

use std::env;

#[derive(Debug, Clone)]
pub struct BrandingConfig {
    pub company_name: String,
    pub tagline: String,
    pub motto: String,
    pub jurisdiction: String,
    pub phones: Vec<String>,
    pub address: String,
    pub contact_line: String,
    pub branches: Vec<String>,
    pub pan: String,
    pub gst: String,
    pub email_signature: String,
    pub email_address_line: String,
    pub email_contact_line: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            company_name: "SSK INDIA LOGISTICS".to_string(),
            tagline: "(Fleet Owner & Contractor)".to_string(),
            motto: "Jai Dada Udmiram Ki".to_string(),
            jurisdiction: "SUBJECT TO DELHI JURISDICTION".to_string(),
            phones: vec![
                "7834819005".to_string(),
                "8929920007".to_string(),
                "7600026311".to_string(),
                "9619905027".to_string(),
            ],
            address: "Shop No. 362-A/2, Sataya Puram Colony, Jharoda Border, Near Ashram, New Delhi-110072"
                .to_string(),
            contact_line: "Mail : ssindialogitics@gmail.com, Web : www.indialogistics.com".to_string(),
            branches: vec![
                "AHMEDABAD".to_string(),
                "SURAT".to_string(),
                "VAPI".to_string(),
                "MUMBAI".to_string(),
                "PUNE".to_string(),
            ],
            pan: "CMFPS3661A".to_string(),
            gst: "07CMFPS3661A1Z6".to_string(),
            email_signature: "SSK Cargo Services Pvt Ltd".to_string(),
            email_address_line: "Shop No-37, New Anaj Mandi, Sampla, Rohtak -124501".to_string(),
            email_contact_line: "Contact: 7834819005, 8929920007 | Email: sskcargoservices@gmail.com"
                .to_string(),
        }
    }
}

impl BrandingConfig {
    /// Defaults sobreescribibles por `BRAND_*`
    pub fn from_env() -> Self {
        let mut branding = Self::default();

        if let Ok(name) = env::var("BRAND_COMPANY_NAME") {
            branding.company_name = name;
        }
        if let Ok(address) = env::var("BRAND_ADDRESS") {
            branding.address = address;
        }
        if let Ok(phones) = env::var("BRAND_PHONES") {
            branding.phones = phones.split(',').map(|p| p.trim().to_string()).collect();
        }
        if let Ok(gst) = env::var("BRAND_GST") {
            branding.gst = gst;
        }
        if let Ok(pan) = env::var("BRAND_PAN") {
            branding.pan = pan;
        }

        branding
    }
}
