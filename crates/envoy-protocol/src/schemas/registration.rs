//! Registration payloads: requesting and redeeming registration codes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{SchemaPayload, SchemaType};

/// Permission level granted to a registered identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityPermissions {
    /// Can create and delete other profiles.
    Admin,
    /// Can add and remove devices.
    Standard,
    /// Neither.
    None,
}

impl IdentityPermissions {
    /// Wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
            Self::None => "none",
        }
    }
}

impl fmt::Display for IdentityPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of identity a registration code creates.
///
/// Wire form is `"profile"` or `"device:<name>"`, where the name is
/// everything after the first colon and is never empty.
///
/// Older peers send a bare `"device"` for the main device. It decodes as
/// `Device("main")` and is always written back as `"device:main"`, so the
/// bare form does not survive a decode and re-encode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegistrationCodeType {
    /// A device under an existing profile.
    Device(String),
    /// A new profile.
    Profile,
}

impl Serialize for RegistrationCodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if matches!(self, Self::Device(name) if name.is_empty()) {
            return Err(serde::ser::Error::custom("device name must not be empty"));
        }
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RegistrationCodeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.split_once(':') {
            Some(("device", name)) if !name.is_empty() => Ok(Self::Device(name.to_string())),
            None if s == "device" => Ok(Self::Device("main".to_string())),
            None if s == "profile" => Ok(Self::Profile),
            _ => Err(serde::de::Error::custom(format!(
                "unexpected registration code type '{s}'"
            ))),
        }
    }
}

impl fmt::Display for RegistrationCodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(name) => write!(f, "device:{name}"),
            Self::Profile => f.write_str("profile"),
        }
    }
}

/// Request for a node to mint a registration code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCodeRequest {
    /// Permissions the redeemed identity will hold.
    pub permissions: IdentityPermissions,
    /// What the code registers.
    pub code_type: RegistrationCodeType,
}

impl SchemaPayload for RegistrationCodeRequest {
    const SCHEMA: SchemaType = SchemaType::CreateRegistrationCode;
}

/// Identity type named in a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityType {
    /// A profile.
    Profile,
    /// A device.
    Device,
}

/// Redemption of a registration code, carrying the new identity's public keys.
///
/// Key fields hold lowercase hex. An empty `code` registers without a code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCode {
    /// The code being redeemed.
    pub code: String,
    /// Name of the profile or device being registered.
    pub registration_name: String,
    /// Device signature public key.
    pub device_identity_pk: String,
    /// Device encryption public key.
    pub device_encryption_pk: String,
    /// Profile signature public key.
    pub profile_identity_pk: String,
    /// Profile encryption public key.
    pub profile_encryption_pk: String,
    /// Profile or device.
    pub identity_type: IdentityType,
    /// Permissions requested.
    pub permission_type: IdentityPermissions,
}

impl SchemaPayload for RegistrationCode {
    const SCHEMA: SchemaType = SchemaType::UseRegistrationCode;
}
