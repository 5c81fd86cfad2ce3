use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailAddress {
    pub name: Option<String>,
    pub email: String,
}

impl EmailAddress {
    pub fn new<S: Into<String>>(email: S) -> Self {
        Self { name: None, email: email.into() }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The body of a `POST /v3/smtp/email` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendSmtpEmail {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub html_content: String,
}

#[cfg(test)]
mod test {
    use super::{EmailAddress, SendSmtpEmail};

    #[test]
    fn email_body_uses_camel_case_on_the_wire() {
        let email = SendSmtpEmail {
            sender: EmailAddress::new("no-reply@loja.com").with_name("Moda Bella"),
            to: vec![EmailAddress::new("cliente@exemplo.com")],
            subject: "[Pedido #15] Recebemos seu pagamento!".to_string(),
            html_content: "<p>Obrigado!</p>".to_string(),
        };
        let json = serde_json::to_value(&email).unwrap();
        assert!(json.get("htmlContent").is_some());
        assert_eq!(json["sender"]["name"], "Moda Bella");
        assert_eq!(json["to"][0]["email"], "cliente@exemplo.com");
    }
}
