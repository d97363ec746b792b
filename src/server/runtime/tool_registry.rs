use std::sync::Arc;

use rmcp::{
    handler::server::{router::prompt::PromptRouter, wrapper::Parameters, ServerHandler},
    model::{
        ErrorData, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        ListResourcesResult, PaginatedRequestParam, PromptMessage, PromptMessageRole,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router, Json, RoleServer,
};
use serde_json::json;

use crate::{
    lib::errors::BibleApiError,
    prompts::{self, BibleStudyArgs, DailyReflectionArgs},
    resources::{self, CatalogError},
    server::config::ServerConfig,
    tools::{
        self,
        bible::{
            self, BibleApiClient, ChapterResponse, GetChapterRequest, GetVerseRequest,
            RandomVerseRequest, SearchVersesRequest, SearchVersesResponse, VersePassage,
        },
        ServerToolRouter,
    },
};

#[derive(Clone)]
pub struct BibleServer {
    config: Arc<ServerConfig>,
    instructions: Arc<String>,
    client: BibleApiClient,
    tool_router: ServerToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl BibleServer {
    pub fn new(config: ServerConfig, instructions: String) -> Result<Self, BibleApiError> {
        let client = BibleApiClient::new(&config.upstream)?;
        Ok(Self {
            config: Arc::new(config),
            instructions: Arc::new(instructions),
            client,
            tool_router: tools::build_router(Self::tool_router),
            prompt_router: Self::prompt_router(),
        })
    }
}

#[tool_router(router = tool_router)]
impl BibleServer {
    #[tool(
        name = "get_verse",
        description = "Get a Bible verse or verse range by reference, e.g. 'John 3:16' or 'Psalm 23:1-6'"
    )]
    async fn get_verse(
        &self,
        Parameters(request): Parameters<GetVerseRequest>,
    ) -> Result<Json<VersePassage>, ErrorData> {
        bible::get_verse(request, &self.client, &self.config.tools)
            .await
            .map(Json)
            .map_err(bible::api_error_to_error_data)
    }

    #[tool(
        name = "search_verses",
        description = "Search Bible verses containing a word or phrase"
    )]
    async fn search_verses(
        &self,
        Parameters(request): Parameters<SearchVersesRequest>,
    ) -> Result<Json<SearchVersesResponse>, ErrorData> {
        bible::search_verses(request, &self.client, &self.config.tools)
            .await
            .map(Json)
            .map_err(bible::api_error_to_error_data)
    }

    #[tool(
        name = "get_chapter",
        description = "Get every verse of a Bible chapter in order"
    )]
    async fn get_chapter(
        &self,
        Parameters(request): Parameters<GetChapterRequest>,
    ) -> Result<Json<ChapterResponse>, ErrorData> {
        bible::get_chapter(request, &self.client, &self.config.tools)
            .await
            .map(Json)
            .map_err(bible::api_error_to_error_data)
    }

    #[tool(
        name = "get_random_verse",
        description = "Get a random encouraging verse from a curated list"
    )]
    async fn get_random_verse(
        &self,
        Parameters(request): Parameters<RandomVerseRequest>,
    ) -> Result<Json<VersePassage>, ErrorData> {
        bible::get_random_verse(request, &self.client, &self.config.tools)
            .await
            .map(Json)
            .map_err(bible::api_error_to_error_data)
    }
}

#[prompt_router]
impl BibleServer {
    #[prompt(
        name = "bible_study",
        description = "Generate a structured Bible study guide for a topic or passage"
    )]
    async fn bible_study(
        &self,
        Parameters(args): Parameters<BibleStudyArgs>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<Vec<PromptMessage>, ErrorData> {
        require_prompt_argument("topic_or_passage", &args.topic_or_passage)?;
        Ok(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            prompts::render_bible_study(&args),
        )])
    }

    #[prompt(
        name = "daily_reflection",
        description = "Generate a daily devotional reflection on a verse or theme"
    )]
    async fn daily_reflection(
        &self,
        Parameters(args): Parameters<DailyReflectionArgs>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<Vec<PromptMessage>, ErrorData> {
        require_prompt_argument("verse_or_theme", &args.verse_or_theme)?;
        let today = chrono::Local::now().date_naive();
        Ok(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            prompts::render_daily_reflection(&args, today),
        )])
    }
}

fn require_prompt_argument(name: &str, value: &str) -> Result<(), ErrorData> {
    if value.trim().is_empty() {
        return Err(ErrorData::invalid_params(
            format!("{name} must not be blank"),
            Some(json!({ "code": "invalid_request", "kind": "validation", "field": name })),
        ));
    }
    Ok(())
}

#[tool_handler(router = self.tool_router)]
#[prompt_handler]
impl ServerHandler for BibleServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(
            resources::list_catalog_resources(),
        ))
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        match resources::read_catalog(&uri) {
            Ok(document) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(document, uri)],
            }),
            Err(err @ CatalogError::UnknownUri { .. }) => Err(ErrorData::resource_not_found(
                err.to_string(),
                Some(json!({ "code": "not_found", "kind": "not_found", "uri": uri })),
            )),
            Err(err) => Err(ErrorData::internal_error(err.to_string(), None)),
        }
    }
}
