use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct AccountDoc {
    pub id: u64,
    pub name: String,
    pub balance: f64,
    pub email: String,
}

#[derive(ToSchema)]
pub struct CreateAccountDoc {
    pub name: String,
    pub balance: f64,
    pub email: String,
}

#[derive(ToSchema)]
pub struct UpdateAccountDoc {
    pub name: Option<String>,
    pub balance: Option<f64>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct AccountResponseDoc {
    pub success: bool,
    pub message: String,
    pub data: AccountDoc,
}

#[derive(ToSchema)]
pub struct AccountListResponseDoc {
    pub success: bool,
    pub message: String,
    pub data: Vec<AccountDoc>,
}

#[derive(ToSchema)]
pub struct ErrorResponseDoc {
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

#[derive(ToSchema)]
pub struct HealthResponseDoc {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::accounts::list_accounts,
        crate::routes::accounts::get_account,
        crate::routes::accounts::create_account,
        crate::routes::accounts::update_account,
        crate::routes::accounts::delete_account,
        crate::routes::external::external_data,
    ),
    components(
        schemas(
            AccountDoc,
            CreateAccountDoc,
            UpdateAccountDoc,
            AccountResponseDoc,
            AccountListResponseDoc,
            ErrorResponseDoc,
            HealthResponseDoc,
        )
    ),
    tags(
        (name = "accounts"),
        (name = "external"),
        (name = "health")
    )
)]
pub struct ApiDoc;
