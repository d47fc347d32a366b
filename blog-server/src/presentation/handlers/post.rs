use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::domain::post::PostView;
use crate::presentation::dto::{ListPostsResponse, PostFormRequest};
use crate::presentation::middleware::RequestId;
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use tracing::info;

/// Where delete and like send the client afterwards.
pub const POSTS_LOCATION: &str = "/api/posts";

type PostForm = web::Either<web::Json<PostFormRequest>, web::Form<PostFormRequest>>;

pub fn scope() -> Scope {
    web::scope("/posts")
        .service(get_posts)
        .service(create_post)
        .service(get_post)
        .service(update_post)
        .service(delete_post)
        .service(like_post)
}

#[get("")]
async fn get_posts(
    req: HttpRequest,
    post: web::Data<PostService>,
) -> Result<HttpResponse, DomainError> {
    let posts = post.get_posts().await?;

    info!(
        request_id = %request_id(&req),
        total = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(ListPostsResponse::from(posts)))
}

#[get("/{id}")]
async fn get_post(
    post: web::Data<PostService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, DomainError> {
    let post = post.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostView::from(post)))
}

#[post("")]
async fn create_post(
    req: HttpRequest,
    post: web::Data<PostService>,
    payload: PostForm,
) -> Result<HttpResponse, DomainError> {
    let form = payload.into_inner();
    let post = post
        .create_post(form.author(), form.title(), form.content())
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(PostView::from(post)))
}

#[put("/{id}")]
async fn update_post(
    req: HttpRequest,
    post: web::Data<PostService>,
    payload: PostForm,
    path: web::Path<u64>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let form = payload.into_inner();
    let post = post
        .update_post(post_id, form.author(), form.title(), form.content())
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(PostView::from(post)))
}

#[delete("/{id}")]
async fn delete_post(
    req: HttpRequest,
    post: web::Data<PostService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    post.delete_post(post_id).await?;

    info!(
        request_id = %request_id(&req),
        post_id,
        "delete handled"
    );

    Ok(redirect_to_posts())
}

#[post("/{id}/like")]
async fn like_post(
    req: HttpRequest,
    post: web::Data<PostService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let likes = post.like_post(post_id).await?;

    info!(
        request_id = %request_id(&req),
        post_id,
        likes,
        "like handled"
    );

    Ok(redirect_to_posts())
}

fn redirect_to_posts() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, POSTS_LOCATION))
        .finish()
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
