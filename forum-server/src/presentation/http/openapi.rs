use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::auth::{
    LoginDto, LoginResponseDto, RegisterDto, RegistrationResponseDto,
};
use crate::presentation::http::handlers::posts::MessageRequestDto;
use crate::presentation::http::handlers::threads::ThreadRequestDto;
use crate::presentation::http::handlers::users::UserUpdateDto;
use crate::presentation::http::mappers::{
    PostDto, PostsPageDto, ReplyDto, ThreadDto, ThreadsPageDto, UserDto, UsersPageDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::threads::list_threads,
        crate::presentation::http::handlers::threads::get_thread,
        crate::presentation::http::handlers::threads::create_thread,
        crate::presentation::http::handlers::threads::update_thread,
        crate::presentation::http::handlers::threads::delete_thread,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::posts::list_replies,
        crate::presentation::http::handlers::posts::create_reply,
        crate::presentation::http::handlers::posts::update_reply,
        crate::presentation::http::handlers::posts::delete_reply,
        crate::presentation::http::handlers::users::list_users,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::users::update_user,
        crate::presentation::http::handlers::users::delete_user
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            LoginResponseDto,
            RegistrationResponseDto,
            ThreadRequestDto,
            MessageRequestDto,
            UserUpdateDto,
            ThreadDto,
            ThreadsPageDto,
            PostDto,
            PostsPageDto,
            ReplyDto,
            UserDto,
            UsersPageDto
        )
    ),
    tags(
        (name = "auth", description = "Login and registration"),
        (name = "threads", description = "Forum threads"),
        (name = "posts", description = "Posts inside a thread"),
        (name = "replies", description = "Replies to a post"),
        (name = "users", description = "User administration")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_nested_reply_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(
            doc.paths
                .paths
                .contains_key("/api/threads/{thread_id}/posts/{post_id}/replies/{reply_id}")
        );
        assert!(doc.paths.paths.contains_key("/api/auth/registration"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
