use actix_web::{get, middleware, web, App, HttpServer, HttpResponse, Responder};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::{load_config, RenderConfig};
use crate::models::SolutionSet;
use crate::parser;
use crate::render::render_png;

#[derive(Parser)]
pub struct ServeCommand {
  // Port to listen on
  #[clap(long, default_value_t = 3000)]
  port: u16,

  // Host to listen on
  #[clap(long, default_value = "localhost")]
  host: String,

  // YAML render style
  #[clap(long)]
  config: Option<String>,

  // Solver log, - for stdin
  #[clap(required=true)]
  input: String,
}

impl ServeCommand {
  pub fn execute(&self) -> Result<()> {
    let config = load_config(self.config.as_deref())?;
    let set = parser::parse_file(&self.input)?;
    let viewer = Viewer { name: self.input.clone(), set, config };

    let rt = Runtime::new().context("failed to start runtime")?;
    rt.block_on(server(&self.host, self.port, Arc::new(viewer)))
      .with_context(|| format!("server on {}:{} failed", self.host, self.port))?;
    Ok(())
  }
}

/// A parsed log plus the style its canvases are drawn with.
pub struct Viewer {
  pub name: String,
  pub set: SolutionSet,
  pub config: RenderConfig,
}

type ViewerArc = Arc<Viewer>;

#[get("/")]
async fn get_index(viewer: web::Data<ViewerArc>) -> impl Responder {
  let mut body = format!(
    "<!doctype html><html><head><title>{0}</title></head><body><h1>{0}</h1><p>{1} solution(s), extent {2}</p>",
    escape(&viewer.name), viewer.set.solutions.len(), viewer.set.extent.get()
  );
  for idx in 1..=viewer.set.solutions.len() {
    body.push_str(&format!(
      "<figure><img src=\"/solutions/{0}.png\" alt=\"solution {0}\"><figcaption>Solution {0}</figcaption></figure>",
      idx
    ));
  }
  body.push_str("</body></html>");

  HttpResponse::Ok()
    .content_type(ContentType(mime::TEXT_HTML_UTF_8))
    .body(body)
}

#[get("/solutions/{index}.png")]
async fn get_solution_image(
  viewer: web::Data<ViewerArc>,
  path: web::Path<usize>,
) -> impl Responder {
  let index = path.into_inner();
  let solution = match index.checked_sub(1).and_then(|i| viewer.set.solutions.get(i)) {
    Some(s) => s,
    None => {
      return HttpResponse::build(StatusCode::NOT_FOUND)
        .content_type(ContentType(mime::TEXT_PLAIN))
        .body("solution not found");
    }
  };

  match render_png(viewer.set.extent.get(), solution, &viewer.config) {
    Ok(imgdata) => HttpResponse::Ok()
      .content_type(ContentType(mime::IMAGE_PNG))
      .body(imgdata),
    Err(err) => {
      error!("unable to render solution {}: {}", index, err);
      HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
        .content_type(ContentType(mime::TEXT_PLAIN))
        .body("unable to render solution")
    }
  }
}

fn escape(text: &str) -> String {
  text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn routes(cfg: &mut web::ServiceConfig) {
  cfg.service(get_index).service(get_solution_image);
}

async fn server(host: &str, port: u16, viewer: ViewerArc) -> std::io::Result<()> {
  info!("Starting server on {}:{}", host, port);
  HttpServer::new(move || {
      App::new()
        .app_data(web::Data::new(viewer.clone()))
        .wrap(middleware::Logger::default())
        .configure(routes)
  })
  .bind((host, port))?
  .run()
  .await
}
