//! Response shapes and the pure functions that build them from stored rows.
//!
//! Nothing here touches the store; callers load the related rows first (see
//! `job_service::hydrate`) and pass immutable snapshots in.

use models::{contact, customer, inventory, job, marketing_campaign, property, user};
use serde::Serialize;

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";
const CLOCK: &str = "%H:%M";

pub const COLOR_COMPLETED: &str = "green";
pub const COLOR_OPEN: &str = "blue";
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: CustomerSummary,
    pub jobs: Vec<JobView>,
    pub properties: Vec<PropertyView>,
    pub contacts: Vec<ContactView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyView {
    pub id: i32,
    pub label: Option<String>,
    pub address: String,
    pub notes: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactView {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobView {
    pub id: i32,
    pub title: String,
    pub start: String,
    pub description: String,
    pub notes: Option<String>,
    pub status: String,
    pub job_date: String,
    pub job_time: Option<String>,
    pub customer: CustomerSummary,
    pub technician_id: Option<i32>,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<i32>,
    pub technician_name: String,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactView>,
}

/// A job together with every row `format_job` needs.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job: job::Model,
    pub customer: customer::Model,
    pub technician: Option<user::Model>,
    pub property: Option<property::Model>,
    pub contact: Option<contact::Model>,
}

impl JobRecord {
    /// Where the work happens: the linked property, else the customer's own address.
    pub fn location(&self) -> Option<&str> {
        match &self.property {
            Some(p) => Some(p.address.as_str()),
            None => self.customer.address.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianView {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit_cost: f64,
    pub selling_price: f64,
    pub supplier: Option<String>,
    pub last_ordered: Option<String>,
    pub expiration_date: Option<String>,
    pub status: inventory::StockStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignContent {
    pub subject: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub audience: Option<String>,
    pub status: String,
    pub sent: i32,
    pub opened: i32,
    pub clicked: i32,
    pub revenue: f64,
    pub created_date: Option<String>,
    pub content: CampaignContent,
}

pub fn serialize_customer(c: &customer::Model) -> CustomerSummary {
    CustomerSummary {
        id: c.id,
        name: c.name.clone(),
        address: c.address.clone(),
        phone: c.phone.clone(),
        email: c.email.clone(),
    }
}

pub fn serialize_property(p: &property::Model) -> PropertyView {
    PropertyView {
        id: p.id,
        label: p.label.clone(),
        address: p.address.clone(),
        notes: p.notes.clone(),
        is_primary: p.is_primary,
    }
}

pub fn serialize_contact(c: &contact::Model) -> ContactView {
    ContactView {
        id: c.id,
        name: c.name.clone(),
        phone: c.phone.clone(),
        email: c.email.clone(),
        title: c.title.clone(),
        is_primary: c.is_primary,
    }
}

pub fn serialize_user(u: &user::Model) -> UserView {
    UserView { id: u.id, email: u.email.clone(), role: u.role.clone() }
}

pub fn technician_entry(u: &user::Model) -> TechnicianView {
    TechnicianView { id: u.id, title: u.display_name() }
}

/// Calendar-ready job payload: `"{customer} - {description}"` title, combined
/// start (09:00 when no time is stored), status colour and technician label.
pub fn format_job(r: &JobRecord) -> JobView {
    let job = &r.job;
    JobView {
        id: job.id,
        title: format!("{} - {}", r.customer.name, job.description),
        start: job.starts_at().format(ISO_DATETIME).to_string(),
        description: job.description.clone(),
        notes: job.notes.clone(),
        status: job.status.clone(),
        job_date: job.job_date.format(ISO_DATE).to_string(),
        job_time: job.job_time.map(|t| t.format(CLOCK).to_string()),
        customer: serialize_customer(&r.customer),
        technician_id: job.technician_id,
        resource_id: job.technician_id,
        technician_name: r
            .technician
            .as_ref()
            .map(user::Model::display_name)
            .unwrap_or_else(|| UNASSIGNED.to_string()),
        color: if job.is_completed() { COLOR_COMPLETED } else { COLOR_OPEN },
        property: r.property.as_ref().map(serialize_property),
        contact: r.contact.as_ref().map(serialize_contact),
    }
}

pub fn serialize_inventory(item: &inventory::Model) -> InventoryView {
    InventoryView {
        id: item.id,
        name: item.name.clone(),
        category: item.category.clone(),
        current_stock: item.current_stock,
        min_stock: item.min_stock,
        max_stock: item.max_stock,
        unit_cost: item.unit_cost,
        selling_price: item.selling_price,
        supplier: item.supplier.clone(),
        last_ordered: item.last_ordered.map(|d| d.format(ISO_DATE).to_string()),
        expiration_date: item.expiration_date.map(|d| d.format(ISO_DATE).to_string()),
        status: item.status(),
    }
}

pub fn format_campaign(c: &marketing_campaign::Model) -> CampaignView {
    CampaignView {
        id: c.id,
        name: c.name.clone(),
        campaign_type: c.campaign_type.clone(),
        audience: c.audience.clone(),
        status: c.status.clone(),
        sent: c.sent,
        opened: c.opened,
        clicked: c.clicked,
        revenue: c.revenue,
        created_date: c.created_date.map(|d| d.format(ISO_DATE).to_string()),
        content: CampaignContent { subject: c.content_subject.clone(), content: c.content_body.clone() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    fn record() -> JobRecord {
        JobRecord {
            job: job::Model {
                id: 4,
                customer_id: 1,
                technician_id: None,
                property_id: None,
                contact_id: None,
                description: "Ant check".into(),
                notes: None,
                status: job::STATUS_SCHEDULED.into(),
                job_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                job_time: None,
            },
            customer: customer::Model {
                id: 1,
                name: "John Doe".into(),
                address: Some("123 Main St".into()),
                phone: Some("216-555-0101".into()),
                email: None,
            },
            technician: None,
            property: None,
            contact: None,
        }
    }

    #[test]
    fn unassigned_job_has_no_resource() {
        let v = format_job(&record());
        assert_eq!(v.technician_name, "Unassigned");
        assert_eq!(v.resource_id, None);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["resourceId"], serde_json::Value::Null);
        assert!(json.get("property").is_none());
        assert!(json.get("contact").is_none());
    }

    #[test]
    fn title_start_and_color() {
        let v = format_job(&record());
        assert_eq!(v.title, "John Doe - Ant check");
        assert_eq!(v.start, "2024-06-01T09:00:00");
        assert_eq!(v.job_time, None);
        assert_eq!(v.color, "blue");

        let mut r = record();
        r.job.job_time = NaiveTime::from_hms_opt(14, 5, 0);
        r.job.status = job::STATUS_COMPLETED.into();
        let v = format_job(&r);
        assert_eq!(v.start, "2024-06-01T14:05:00");
        assert_eq!(v.job_time.as_deref(), Some("14:05"));
        assert_eq!(v.color, "green");
    }

    #[test]
    fn technician_and_links_are_included_when_present() {
        let mut r = record();
        r.job.technician_id = Some(2);
        r.technician = Some(user::Model { id: 2, email: "dave@pestpro.com".into(), role: "Technician".into() });
        r.property = Some(property::Model {
            id: 9,
            customer_id: 1,
            label: Some("Cabin".into()),
            address: "9 Lake Rd".into(),
            notes: None,
            is_primary: false,
        });
        r.contact = Some(contact::Model {
            id: 3,
            customer_id: 1,
            name: "Sue".into(),
            phone: None,
            email: None,
            title: Some("Manager".into()),
            is_primary: true,
        });
        let json = serde_json::to_value(format_job(&r)).unwrap();
        assert_eq!(json["technician_name"], "Dave");
        assert_eq!(json["resourceId"], 2);
        assert_eq!(json["property"], json!({"id": 9, "label": "Cabin", "address": "9 Lake Rd", "notes": null, "is_primary": false}));
        assert_eq!(json["contact"]["is_primary"], true);
        assert_eq!(r.location(), Some("9 Lake Rd"));
    }

    #[test]
    fn location_falls_back_to_customer_address() {
        assert_eq!(record().location(), Some("123 Main St"));
    }

    #[test]
    fn inventory_uses_camel_case_and_derived_status() {
        let item = inventory::Model {
            id: 1,
            name: "Bed Bug Spray".into(),
            category: None,
            current_stock: 5,
            min_stock: 8,
            max_stock: 30,
            unit_cost: 25.0,
            selling_price: 45.0,
            supplier: None,
            last_ordered: NaiveDate::from_ymd_opt(2024, 5, 1),
            expiration_date: None,
        };
        let json = serde_json::to_value(serialize_inventory(&item)).unwrap();
        assert_eq!(json["currentStock"], 5);
        assert_eq!(json["lastOrdered"], "2024-05-01");
        assert_eq!(json["status"], "Low Stock");
    }

    #[test]
    fn campaign_nests_content() {
        let c = marketing_campaign::Model {
            id: 1,
            name: "Spring".into(),
            campaign_type: Some("Email".into()),
            audience: Some("Residential".into()),
            status: "Draft".into(),
            sent: 0,
            opened: 0,
            clicked: 0,
            revenue: 0.0,
            created_date: None,
            content_subject: Some("Hi".into()),
            content_body: Some("Body".into()),
        };
        let json = serde_json::to_value(format_campaign(&c)).unwrap();
        assert_eq!(json["type"], "Email");
        assert_eq!(json["createdDate"], serde_json::Value::Null);
        assert_eq!(json["content"], json!({"subject": "Hi", "content": "Body"}));
    }
}
