//! # Login Ticket Document
//!
//! The decoded token is an XML document shaped like:
//!
//! ```xml
//! <sso version="2.0">
//!   <id src="CN=sua" dst="CN=padron" unique_id="1234" gen_time="1700000000" exp_time="1700036000"/>
//!   <operation type="login" value="granted">
//!     <login service="padron" uid="jperez" authmethod="password">
//!       <info name="cuil" value="20-24264377-2"/>
//!       <info name="email" value="jperez@example.com"/>
//!       <info name="legajo" value="40123"/>
//!       <groups>
//!         <group name="operadores"/>
//!       </groups>
//!       <service_data>opaque</service_data>
//!     </login>
//!   </operation>
//! </sso>
//! ```
//!
//! Times are Unix epoch seconds. Unknown elements and attributes are
//! ignored.

use serde::Deserialize;

use crate::error::AuthError;

/// Root `<sso>` element.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub operation: Operation,
}

/// `<id>` element: issuance metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketId {
    #[serde(rename = "@unique_id", default)]
    pub unique_id: String,
    #[serde(rename = "@gen_time")]
    pub gen_time: i64,
    #[serde(rename = "@exp_time")]
    pub exp_time: i64,
}

/// `<operation>` element.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@value")]
    pub value: String,
    pub login: LoginElement,
}

/// `<login>` element: the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginElement {
    #[serde(rename = "@service", default)]
    pub service: String,
    #[serde(rename = "@uid")]
    pub uid: Option<String>,
    #[serde(rename = "info", default)]
    pub info: Vec<Info>,
    #[serde(default)]
    pub groups: Groups,
    #[serde(default)]
    pub service_data: Option<String>,
}

/// `<info name=".." value=".."/>` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Groups {
    #[serde(rename = "group", default)]
    pub group: Vec<Group>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    #[serde(rename = "@name")]
    pub name: String,
}

impl Ticket {
    /// Parse decoded ticket bytes.
    pub fn from_xml(bytes: &[u8]) -> Result<Self, AuthError> {
        Ok(quick_xml::de::from_reader(bytes)?)
    }

    /// Whether the ticket records a granted login.
    pub fn is_granted_login(&self) -> bool {
        self.operation.kind == "login" && self.operation.value == "granted"
    }
}

impl LoginElement {
    /// Value of the first `<info>` entry called `name`.
    pub fn info(&self, name: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.value.as_str())
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.group.iter().map(|g| g.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sso version="2.0">
  <id src="CN=sua" dst="CN=padron" unique_id="1234" gen_time="1700000000" exp_time="1700036000"/>
  <operation type="login" value="granted">
    <login service="padron" uid="jperez" authmethod="password">
      <relations><relation key="1" reltype="4"/></relations>
      <info name="cuil" value="20-24264377-2"/>
      <info name="email" value="jperez@example.com"/>
      <groups>
        <group name="operadores"/>
        <group name="consultas"/>
      </groups>
    </login>
  </operation>
</sso>"#;

    #[test]
    fn parses_sample() {
        let ticket = Ticket::from_xml(SAMPLE.as_bytes()).unwrap();
        assert!(ticket.is_granted_login());
        assert_eq!(ticket.id.unique_id, "1234");
        assert_eq!(ticket.id.gen_time, 1_700_000_000);
        assert_eq!(ticket.id.exp_time, 1_700_036_000);
        let login = &ticket.operation.login;
        assert_eq!(login.service, "padron");
        assert_eq!(login.uid.as_deref(), Some("jperez"));
        assert_eq!(login.info("cuil"), Some("20-24264377-2"));
        assert_eq!(login.info("legajo"), None);
        assert_eq!(login.group_names(), vec!["operadores", "consultas"]);
        assert!(login.service_data.is_none());
    }

    #[test]
    fn rejects_non_xml() {
        assert!(matches!(
            Ticket::from_xml(b"not a ticket"),
            Err(AuthError::Xml(_))
        ));
    }

    #[test]
    fn rejects_missing_times() {
        let xml = r#"<sso><id/><operation type="login" value="granted"><login/></operation></sso>"#;
        assert!(Ticket::from_xml(xml.as_bytes()).is_err());
    }
}
