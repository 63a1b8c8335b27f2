// @generated by pblitec from example/contact.proto

#![allow(unused_variables)]

use pblite::{Enum, Message};
use serde::Serialize;

#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct I18nData {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "region_code")]
    pub region_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "is_valid")]
    pub is_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "country_code")]
    pub country_code: Option<u32>,
}
impl Message for I18nData {
    fn get_name(&self) -> &str {
        "I18nData"
    }
    fn set_field(&mut self, number: usize, field_value: &serde_json::Value) -> pblite::Result<()> {
        match number {
            0 => self.region_code = pblite::read_optional(field_value, &pblite::read_string)?,
            1 => self.is_valid = pblite::read_optional(field_value, &pblite::read_bool)?,
            2 => self.country_code = pblite::read_optional(field_value, &pblite::read_uint32)?,
            _ => {}
        };
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct PhoneNumber {
    #[serde(rename = "e164")]
    pub e164: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "i18n_data")]
    pub i18n_data: Option<I18nData>,
}
impl Message for PhoneNumber {
    fn get_name(&self) -> &str {
        "PhoneNumber"
    }
    fn set_field(&mut self, number: usize, field_value: &serde_json::Value) -> pblite::Result<()> {
        match number {
            0 => self.e164 = pblite::read_optional(field_value, &pblite::read_string)?.unwrap_or_default(),
            1 => self.i18n_data = pblite::read_optional(field_value, &pblite::read_message)?,
            _ => {}
        };
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct ContactList {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "numbers")]
    pub numbers: Option<Vec<PhoneNumber>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "revision")]
    pub revision: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "default_type")]
    pub default_type: Option<PhoneType>,
}
impl Message for ContactList {
    fn get_name(&self) -> &str {
        "ContactList"
    }
    fn set_field(&mut self, number: usize, field_value: &serde_json::Value) -> pblite::Result<()> {
        match number {
            0 => self.numbers = pblite::read_array(field_value, &pblite::read_message)?,
            1 => self.revision = pblite::read_optional(field_value, &pblite::read_uint64)?,
            2 => self.default_type = pblite::read_optional(field_value, &pblite::read_enum)?,
            _ => {}
        };
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub enum PhoneType {
    #[default]
    PhoneTypeUnknown,
    PhoneTypeMobile,
    PhoneTypeWork,
}
impl Enum for PhoneType {
    fn from_u32(value: u32) -> Self {
        match value {
            0 => PhoneType::PhoneTypeUnknown,
            1 => PhoneType::PhoneTypeMobile,
            2 => PhoneType::PhoneTypeWork,
            _ => PhoneType::PhoneTypeUnknown,
        }
    }
}
