//! Create `marketing_campaign` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MarketingCampaign::Table)
                    .if_not_exists()
                    .col(pk_auto(MarketingCampaign::Id))
                    .col(string_len(MarketingCampaign::Name, 150))
                    .col(string_len_null(MarketingCampaign::CampaignType, 50))
                    .col(string_len_null(MarketingCampaign::Audience, 50))
                    .col(string_len(MarketingCampaign::Status, 50).default("Draft"))
                    .col(integer(MarketingCampaign::Sent).default(0))
                    .col(integer(MarketingCampaign::Opened).default(0))
                    .col(integer(MarketingCampaign::Clicked).default(0))
                    .col(double(MarketingCampaign::Revenue).default(0.0))
                    .col(date_null(MarketingCampaign::CreatedDate))
                    .col(string_len_null(MarketingCampaign::ContentSubject, 200))
                    .col(text_null(MarketingCampaign::ContentBody))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MarketingCampaign::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MarketingCampaign {
    Table,
    Id,
    Name,
    CampaignType,
    Audience,
    Status,
    Sent,
    Opened,
    Clicked,
    Revenue,
    CreatedDate,
    ContentSubject,
    ContentBody,
}
