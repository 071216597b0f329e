/// MCP server for the SNAP Photo support page.
///
/// Each page interaction is a tool:
/// - `search_faqs`: live search with highlighted matches
/// - `list_categories`, `open_category`, `go_back`, `clear_search`: view navigation
/// - `render_view`: HTML of the current view
/// - `submit_contact`: validate and submit the support ticket form
/// - `reload_faqs`: re-fetch the FAQ document
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::category::sanitize_category;
use crate::contact::{ContactDesk, SubmitError};
use crate::render::highlighted_html;
use crate::reload::ReloadService;
use crate::search::result_announcement;
use crate::session::{LoadStatus, RenderedView, SupportSession, ViewEvent};
use crate::validation::ContactForm;
use support_common::mcp_api::{
    CategoryInfo, CategoryListResponse, FaqHit, FieldErrorInfo, OpenCategoryParams,
    ReloadFaqsResponse, SearchFaqsParams, SearchFaqsResponse, SubmitContactParams,
    SubmitContactResponse, ViewResponse,
};

#[derive(Clone)]
pub struct SnapSupportServer {
    session: Arc<RwLock<SupportSession>>,
    reload_service: Arc<ReloadService>,
    contact_desk: Arc<ContactDesk>,
    tool_router: ToolRouter<SnapSupportServer>,
}

impl SnapSupportServer {
    pub fn new(
        session: SupportSession,
        reload_service: Arc<ReloadService>,
        contact_desk: Arc<ContactDesk>,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            reload_service,
            contact_desk,
            tool_router: Self::tool_router(),
        }
    }

    async fn apply_event(&self, event: ViewEvent) -> Result<Json<ViewResponse>, String> {
        let mut session = self.session.write().await;
        session.apply(event).map_err(|e| e.to_string())?;
        Ok(Json(to_view_response(session.render_view())))
    }
}

#[tool_router]
impl SnapSupportServer {
    #[tool(description = "Search the support FAQs. Matches questions, answers and keywords case-insensitively and returns hits with the query highlighted. An empty query clears the search.")]
    async fn search_faqs(
        &self,
        Parameters(params): Parameters<SearchFaqsParams>,
    ) -> Result<Json<SearchFaqsResponse>, String> {
        let query = params.query.trim().to_string();

        let mut session = self.session.write().await;
        let results: Vec<FaqHit> = session
            .search(&query)
            .into_iter()
            .map(|(position, record)| FaqHit {
                position,
                question: record.question.clone(),
                category: sanitize_category(&record.category),
                question_html: highlighted_html(&record.question, &query),
                answer_html: highlighted_html(&record.answer, &query),
            })
            .collect();

        let announcement = result_announcement(&query, results.len());
        if !query.is_empty() {
            info!(query = %query, hits = results.len(), "FAQ search");
        }

        Ok(Json(SearchFaqsResponse {
            query,
            results,
            announcement,
        }))
    }

    #[tool(description = "List FAQ categories in page order with their icon and number of questions.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let session = self.session.read().await;
        if let LoadStatus::Failed(reason) = session.status() {
            return Err(format!("FAQs are unavailable: {reason}"));
        }
        let categories = session
            .groups()
            .iter()
            .map(|g| CategoryInfo {
                key: g.key.clone(),
                label: g.label.clone(),
                icon: g.icon.to_string(),
                faq_count: g.records.len(),
            })
            .collect();
        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Open a FAQ category (by name as listed by list_categories) and return its rendered questions.")]
    async fn open_category(
        &self,
        Parameters(params): Parameters<OpenCategoryParams>,
    ) -> Result<Json<ViewResponse>, String> {
        let category = params.category.trim().to_string();
        if category.is_empty() {
            return Err("category must not be empty".to_string());
        }
        self.apply_event(ViewEvent::OpenCategory(category)).await
    }

    #[tool(description = "Leave the current category or search and return to the category overview.")]
    async fn go_back(&self) -> Result<Json<ViewResponse>, String> {
        self.apply_event(ViewEvent::Back).await
    }

    #[tool(description = "Clear the active search and return to the view it was started from.")]
    async fn clear_search(&self) -> Result<Json<ViewResponse>, String> {
        self.apply_event(ViewEvent::ClearSearch).await
    }

    #[tool(description = "Render the current support page view as an HTML fragment.")]
    async fn render_view(&self) -> Result<Json<ViewResponse>, String> {
        let session = self.session.read().await;
        Ok(Json(to_view_response(session.render_view())))
    }

    #[tool(description = "Validate and submit the support ticket contact form. Invalid fields are reported with inline messages and the field to focus.")]
    async fn submit_contact(
        &self,
        Parameters(params): Parameters<SubmitContactParams>,
    ) -> Result<Json<SubmitContactResponse>, String> {
        let form = ContactForm {
            name: params.name,
            email: params.email,
            subject: params.subject,
            order_number: params.order_number,
            message: params.message,
        };

        match self.contact_desk.submit(&form).await {
            Ok(receipt) => Ok(Json(SubmitContactResponse {
                accepted: true,
                notice: Some(receipt.notice),
                reference: Some(receipt.reference),
                errors: Vec::new(),
                focus_field: None,
            })),
            Err(SubmitError::Validation(report)) => Ok(Json(SubmitContactResponse {
                accepted: false,
                notice: None,
                reference: None,
                errors: report
                    .errors()
                    .map(|(kind, message)| FieldErrorInfo {
                        field: kind.id().to_string(),
                        message: message.to_string(),
                    })
                    .collect(),
                focus_field: report.first_invalid().map(|k| k.id().to_string()),
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    #[tool(description = "Re-fetch the FAQ document. Re-parses and refreshes the page only when the content changed.")]
    async fn reload_faqs(&self) -> Result<Json<ReloadFaqsResponse>, String> {
        info!("reload_faqs tool invoked");

        // Held across the fetch so the stored digest always describes the live records.
        let mut session = self.session.write().await;
        let (result, records) = self.reload_service.reload().await.map_err(|e| {
            warn!(error = %e, "FAQ reload failed");
            format!("reload failed: {e}")
        })?;

        if let Some(records) = records {
            session.replace_records(records);
            info!(
                faqs = session.records().len(),
                view = session.view().name(),
                "in-memory FAQs updated"
            );
        }

        Ok(Json(ReloadFaqsResponse {
            updated: result.updated,
            digest: result.digest,
            faq_count: session.records().len(),
        }))
    }
}

fn to_view_response(rendered: RenderedView) -> ViewResponse {
    ViewResponse {
        view: rendered.view.to_string(),
        title: rendered.title,
        html: rendered.html,
    }
}

#[tool_handler]
impl ServerHandler for SnapSupportServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "snap-support".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "SNAP Photo support page server. Use search_faqs for free-text questions, \
                 list_categories/open_category/go_back to browse, render_view for the current \
                 page HTML, submit_contact to send a support ticket, and reload_faqs to refresh \
                 the FAQ document."
                    .to_string(),
            ),
        }
    }
}
