//! HTML templates.

use std::fmt::{self, Write};

use super::{ContactMessage, LineItem, OrderSummary, RenderError, StatusPresentation, StatusUpdate};
use crate::{delivery::DeliveryAddress, money::format_amount};

const BRAND: &str = "Mealbox";

/// HTML-escapes its contents when displayed.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => f.write_char(c)?,
            }
        }

        Ok(())
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<Escaped<'a>, RenderError> {
    if value.trim().is_empty() {
        return Err(RenderError::MissingField(field));
    }

    Ok(Escaped(value))
}

fn open(html: &mut String, title: &str, accent: &str) -> fmt::Result {
    write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body style=\"font-family:Arial,sans-serif;background:#f9fafb;margin:0;padding:24px\">\
         <div style=\"max-width:600px;margin:0 auto;background:#ffffff;border-radius:8px;overflow:hidden\">\
         <div style=\"background:{accent};color:#ffffff;padding:24px\"><h1 style=\"margin:0\">{title}</h1></div>\
         <div style=\"padding:24px\">",
        title = Escaped(title),
    )
}

fn close(html: &mut String) -> fmt::Result {
    write!(
        html,
        "</div><div style=\"padding:16px 24px;color:#6b7280;font-size:12px\">{BRAND}</div></div></body></html>"
    )
}

fn line_items(html: &mut String, items: &[LineItem]) -> Result<(), RenderError> {
    if items.is_empty() {
        return Err(RenderError::NoLineItems);
    }

    html.push_str(
        "<table style=\"width:100%;border-collapse:collapse\">\
         <tr><th align=\"left\">Item</th><th align=\"right\">Qty</th><th align=\"right\">Price</th></tr>",
    );

    for item in items {
        write!(
            html,
            "<tr><td>{}</td><td align=\"right\">{}</td><td align=\"right\">{}</td></tr>",
            required("items.name", &item.name)?,
            item.quantity,
            format_amount(item.price)?,
        )?;
    }

    html.push_str("</table>");

    Ok(())
}

fn address_block(html: &mut String, address: &DeliveryAddress) -> Result<(), RenderError> {
    write!(
        html,
        "<h3>Delivery address</h3><p>{}<br>{}<br>{}, {}, {}<br>{}</p>",
        required("address.name", &address.name)?,
        required("address.street", &address.street)?,
        required("address.city", &address.city)?,
        required("address.lga", &address.lga)?,
        required("address.state", &address.state)?,
        required("address.phone", &address.phone)?,
    )?;

    Ok(())
}

pub(super) fn order_confirmation(summary: &OrderSummary) -> Result<String, RenderError> {
    let mut html = String::new();

    open(&mut html, "Thank you for your order", "#16a34a")?;
    write!(
        html,
        "<p>Hi {},</p><p>We have received your order <strong>#{}</strong> and will let you know as it moves along.</p>",
        required("customerName", &summary.customer_name)?,
        required("orderId", &summary.order_id)?,
    )?;

    line_items(&mut html, &summary.items)?;
    write!(
        html,
        "<p style=\"font-size:18px\"><strong>Total: {}</strong></p>",
        format_amount(summary.amount)?
    )?;
    address_block(&mut html, &summary.address)?;
    close(&mut html)?;

    Ok(html)
}

pub(super) fn admin_order_alert(summary: &OrderSummary) -> Result<String, RenderError> {
    let mut html = String::new();

    open(&mut html, "New order received", "#1d4ed8")?;
    write!(
        html,
        "<p>Order <strong>#{}</strong> was placed by {} ({}).</p><p>Amount: <strong>{}</strong></p>",
        required("orderId", &summary.order_id)?,
        required("customerName", &summary.customer_name)?,
        required("customerEmail", &summary.customer_email)?,
        format_amount(summary.amount)?,
    )?;

    line_items(&mut html, &summary.items)?;
    address_block(&mut html, &summary.address)?;
    close(&mut html)?;

    Ok(html)
}

pub(super) fn status_update(update: &StatusUpdate) -> Result<String, RenderError> {
    let presentation = StatusPresentation::for_status(update.current_status);
    let mut html = String::new();

    open(&mut html, presentation.headline, presentation.color)?;
    write!(
        html,
        "<p>Hi {},</p><p style=\"font-size:32px;margin:8px 0\">{}</p><p>{}</p>",
        required("customerName", &update.customer_name)?,
        presentation.icon,
        presentation.message,
    )?;

    write!(
        html,
        "<p>Order <strong>#{}</strong>: ",
        required("orderId", &update.order_id)?
    )?;

    if let Some(previous) = update.previous_status {
        write!(html, "{} &rarr; ", previous.display_name())?;
    }

    write!(
        html,
        "<strong style=\"color:{}\">{}</strong></p>\
         <p><a href=\"{}\" style=\"color:{}\">Track your order</a></p>",
        presentation.color,
        update.current_status.display_name(),
        required("trackingUrl", &update.tracking_url)?,
        presentation.color,
    )?;

    close(&mut html)?;

    Ok(html)
}

pub(super) fn contact_form(contact: &ContactMessage) -> Result<String, RenderError> {
    let mut html = String::new();

    open(&mut html, "New contact form message", "#0f766e")?;
    write!(
        html,
        "<p><strong>From:</strong> {} &lt;{}&gt;</p><p><strong>Subject:</strong> {}</p>\
         <div style=\"white-space:pre-wrap;border-left:4px solid #0f766e;padding-left:12px\">{}</div>",
        required("name", &contact.name)?,
        required("email", &contact.email)?,
        required("subject", &contact.subject)?,
        required("message", &contact.message)?,
    )?;
    close(&mut html)?;

    Ok(html)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{notifications::Notification, orders::DeliveryStatus};

    fn summary() -> OrderSummary {
        OrderSummary {
            order_id: "0191c2d4-7e1a-7c3b".to_string(),
            customer_name: "Ada Obi".to_string(),
            customer_email: "ada@example.com".to_string(),
            amount: 567_500,
            items: vec![LineItem {
                name: "Egusi Soup Kit".to_string(),
                quantity: 1,
                price: 450_000,
            }],
            address: DeliveryAddress {
                name: "Ada Obi".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+2348000000000".to_string(),
                street: "12 Allen Avenue".to_string(),
                city: "Ikeja".to_string(),
                state: "Lagos".to_string(),
                lga: "Ikeja".to_string(),
            },
        }
    }

    fn status_update_for(status: DeliveryStatus) -> StatusUpdate {
        StatusUpdate {
            order_id: "0191c2d4".to_string(),
            customer_name: "Ada".to_string(),
            previous_status: Some(DeliveryStatus::Pending),
            current_status: status,
            tracking_url: "https://mealbox.example/orders/0191c2d4".to_string(),
        }
    }

    #[test]
    fn escaped_replaces_markup() {
        assert_eq!(
            Escaped("<b>\"Tom\" & 'Jerry'</b>").to_string(),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn confirmation_lists_items_total_and_address() -> TestResult {
        let html = order_confirmation(&summary())?;

        assert!(html.contains("Egusi Soup Kit"));
        assert!(html.contains("5,675.00"));
        assert!(html.contains("12 Allen Avenue"));
        assert!(html.contains("#0191c2d4-7e1a-7c3b"));

        Ok(())
    }

    #[test]
    fn confirmation_fails_without_items() {
        let mut summary = summary();
        summary.items.clear();

        assert!(matches!(
            order_confirmation(&summary),
            Err(RenderError::NoLineItems)
        ));
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let mut summary = summary();
        summary.customer_email = " ".to_string();

        assert!(matches!(
            admin_order_alert(&summary),
            Err(RenderError::MissingField("customerEmail"))
        ));
    }

    #[test]
    fn missing_address_field_is_reported() {
        let mut summary = summary();
        summary.address.street = String::new();

        assert!(matches!(
            order_confirmation(&summary),
            Err(RenderError::MissingField("address.street"))
        ));
    }

    #[test]
    fn user_text_is_escaped() -> TestResult {
        let mut summary = summary();
        summary.customer_name = "<script>alert(1)</script>".to_string();

        let html = order_confirmation(&summary)?;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        Ok(())
    }

    #[test]
    fn status_update_varies_presentation_by_status() -> TestResult {
        for status in DeliveryStatus::ALL {
            let presentation = StatusPresentation::for_status(status);

            let html = status_update(&status_update_for(status))?;

            assert!(html.contains(presentation.icon), "{status} icon");
            assert!(html.contains(presentation.color), "{status} colour");
            assert!(html.contains(status.display_name()), "{status} name");
        }

        Ok(())
    }

    #[test]
    fn status_update_requires_tracking_url() {
        let mut update = status_update_for(DeliveryStatus::Packed);
        update.tracking_url = String::new();

        assert!(matches!(
            Notification::StatusUpdate(update).render(),
            Err(RenderError::MissingField("trackingUrl"))
        ));
    }

    #[test]
    fn contact_form_includes_sender_and_message() -> TestResult {
        let html = contact_form(&ContactMessage {
            name: "Tunde".to_string(),
            email: "tunde@example.com".to_string(),
            subject: "Bulk order".to_string(),
            message: "Can I order 40 kits?".to_string(),
        })?;

        assert!(html.contains("tunde@example.com"));
        assert!(html.contains("Can I order 40 kits?"));

        Ok(())
    }
}
