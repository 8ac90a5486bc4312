//! GraphQL surface for user administration and post authoring.
//!
//! ```graphql
//! query { users { _id name userName role } }
//!
//! mutation {
//!   createUser(input: { name: "Team1", userName: "t1", password: "secret" })
//! }
//!
//! mutation {
//!   createPost(input: { id: "Post1", task: "1+1", isUrl: false,
//!                       solution: "2", lon: 12.49, lat: 55.77 })
//! }
//! ```

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Object, Schema, SimpleObject,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension,
    extract::State,
    response::{Html, IntoResponse},
};
use tracing::error;

use quest_core::{GameError, GameFacade, NewPost, UserDirectory};
use quest_types::{NewUser, Role, User};

use crate::middleware::AuthUser;
use crate::state::AppState;

pub type QuestSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Whether basic auth guards the endpoint; mutations then need an admin.
#[derive(Debug, Clone, Copy)]
struct AuthRequired(bool);

pub fn build_schema(
    game: Arc<GameFacade>,
    users: Arc<UserDirectory>,
    auth_required: bool,
) -> QuestSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(game)
        .data(users)
        .data(AuthRequired(auth_required))
        .finish()
}

#[derive(SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    #[graphql(name = "_id")]
    pub id: String,
    pub name: String,
    pub user_name: String,
    pub role: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            user_name: user.user_name,
            role: user.role.to_string(),
        }
    }
}

#[derive(InputObject)]
pub struct UserInput {
    pub name: String,
    pub user_name: String,
    pub password: String,
}

#[derive(InputObject)]
pub struct PostInput {
    pub id: String,
    pub task: String,
    #[graphql(default)]
    pub is_url: bool,
    pub solution: String,
    pub lon: f64,
    pub lat: f64,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All registered users. Password hashes are never exposed.
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<UserObject>> {
        let users = ctx.data::<Arc<UserDirectory>>()?.clone();
        let all = blocking(move || users.get_all_users()).await?;
        Ok(all.into_iter().map(UserObject::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Sign up a new player with the `user` role.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        input: UserInput,
    ) -> async_graphql::Result<String> {
        require_admin(ctx)?;
        let users = ctx.data::<Arc<UserDirectory>>()?.clone();
        blocking(move || {
            users.add_user(NewUser {
                name: input.name,
                user_name: input.user_name,
                password: input.password,
                role: Role::User,
            })
        })
        .await
    }

    /// Pin a new task to a location.
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        input: PostInput,
    ) -> async_graphql::Result<String> {
        require_admin(ctx)?;
        let game = ctx.data::<Arc<GameFacade>>()?.clone();
        let post = blocking(move || {
            game.add_post(NewPost {
                id: input.id,
                task_text: input.task,
                is_url: input.is_url,
                solution: input.solution,
                lon: input.lon,
                lat: input.lat,
            })
        })
        .await?;
        Ok(format!("Post {} was added", post.id))
    }
}

fn require_admin(ctx: &Context<'_>) -> async_graphql::Result<()> {
    let AuthRequired(required) = *ctx.data::<AuthRequired>()?;
    if !required {
        return Ok(());
    }
    match ctx.data_opt::<AuthUser>() {
        Some(user) if user.role == Role::Admin => Ok(()),
        _ => Err(async_graphql::Error::new("Not Authorized").extend_with(|_, e| e.set("code", 403))),
    }
}

async fn blocking<T, F>(f: F) -> async_graphql::Result<T>
where
    F: FnOnce() -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            async_graphql::Error::new("Internal server error")
                .extend_with(|_, ext| ext.set("code", 500))
        })?
        .map_err(to_graphql_error)
}

fn to_graphql_error(err: GameError) -> async_graphql::Error {
    let code = i32::from(err.status_code());
    let message = if err.is_client_error() {
        err.to_string()
    } else {
        error!("GraphQL resolver failed: {:#}", err);
        "Internal server error".to_string()
    };
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

pub async fn graphql_handler(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut req = req.into_inner();
    if let Some(Extension(user)) = auth {
        req = req.data(user);
    }
    state.schema.execute(req).await.into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
