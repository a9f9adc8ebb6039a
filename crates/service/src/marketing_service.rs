use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;

use models::marketing_campaign;
use crate::errors::ServiceError;
use crate::views::{format_campaign, CampaignView};

#[derive(Debug, Default, Deserialize)]
pub struct CampaignContentInput {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewCampaign {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub campaign_type: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub content: Option<CampaignContentInput>,
}

/// Campaigns, newest first.
pub async fn list_campaigns(db: &DatabaseConnection) -> Result<Vec<CampaignView>, ServiceError> {
    let rows = marketing_campaign::Entity::find()
        .order_by_desc(marketing_campaign::Column::CreatedDate)
        .order_by_desc(marketing_campaign::Column::Id)
        .all(db)
        .await?;
    Ok(rows.iter().map(format_campaign).collect())
}

/// New campaigns start as drafts dated `today` with zeroed counters.
pub async fn create_campaign(
    db: &DatabaseConnection,
    input: NewCampaign,
    today: NaiveDate,
) -> Result<CampaignView, ServiceError> {
    let name = input.name.unwrap_or_default().trim().to_string();
    marketing_campaign::validate_name(&name)?;
    let content = input.content.unwrap_or_default();
    let created = marketing_campaign::ActiveModel {
        id: NotSet,
        name: Set(name),
        campaign_type: Set(input.campaign_type),
        audience: Set(input.audience),
        status: Set(marketing_campaign::STATUS_DRAFT.to_string()),
        sent: Set(0),
        opened: Set(0),
        clicked: Set(0),
        revenue: Set(0.0),
        created_date: Set(Some(today)),
        content_subject: Set(content.subject),
        content_body: Set(content.content),
    }
    .insert(db)
    .await?;
    info!(campaign_id = created.id, "campaign created");
    Ok(format_campaign(&created))
}
