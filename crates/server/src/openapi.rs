use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct NewJobDoc {
    /// Integer or numeric string
    pub customer_id: i32,
    pub description: String,
    /// YYYY-MM-DD
    pub job_date: String,
    /// HH:MM
    pub job_time: Option<String>,
    pub technician_id: Option<i32>,
    pub property_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub notes: Option<String>,
}

/// Every field optional; `null` clears technician, property, contact or notes.
#[derive(ToSchema)]
pub struct JobUpdateDoc {
    pub customer_id: Option<i32>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub technician_id: Option<i32>,
    pub property_id: Option<i32>,
    pub contact_id: Option<i32>,
    /// ISO timestamp setting date and time together
    pub start: Option<String>,
    pub job_date: Option<String>,
    pub job_time: Option<String>,
}

#[derive(ToSchema)]
pub struct CustomerDoc {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct BulkUploadDoc {
    #[schema(value_type = Vec<Object>)]
    pub customers: Vec<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct PropertyDoc {
    pub label: Option<String>,
    pub address: String,
    pub notes: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(ToSchema)]
pub struct ContactDoc {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(ToSchema)]
pub struct UserDoc { pub email: String, pub role: String }

#[derive(ToSchema)]
pub struct RoleDoc { pub role: Option<String> }

#[derive(ToSchema)]
pub struct LoginDoc { pub email: String }

#[derive(Serialize, ToSchema)]
pub struct CampaignContentDoc { pub subject: Option<String>, pub content: Option<String> }

#[derive(Serialize, ToSchema)]
pub struct CampaignDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub audience: Option<String>,
    pub content: Option<CampaignContentDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::jobs::list,
        crate::routes::jobs::create,
        crate::routes::jobs::update,
        crate::routes::jobs::agenda,
        crate::routes::customers::list,
        crate::routes::customers::create,
        crate::routes::customers::detail,
        crate::routes::customers::update,
        crate::routes::customers::remove,
        crate::routes::customers::bulk_upload,
        crate::routes::customers::list_properties,
        crate::routes::customers::create_property,
        crate::routes::customers::list_contacts,
        crate::routes::customers::create_contact,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::users::technicians,
        crate::routes::auth::login,
        crate::routes::calendar::feed,
        crate::routes::insights::dashboard,
        crate::routes::insights::reports,
        crate::routes::insights::inventory,
        crate::routes::insights::list_campaigns,
        crate::routes::insights::create_campaign,
    ),
    components(
        schemas(
            HealthResponse,
            NewJobDoc,
            JobUpdateDoc,
            CustomerDoc,
            BulkUploadDoc,
            PropertyDoc,
            ContactDoc,
            UserDoc,
            RoleDoc,
            LoginDoc,
            CampaignContentDoc,
            CampaignDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "jobs"),
        (name = "customers"),
        (name = "users"),
        (name = "auth"),
        (name = "calendar"),
        (name = "insights")
    )
)]
pub struct ApiDoc;
