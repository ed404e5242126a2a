use actix_web::{get, head, web, HttpResponse, Responder};
use crate::models::{AppState, Grid, LangInfo, SolverResponse};
use crate::services::solver::lookup;
use log::{info, warn};

#[head("/solver")]
pub async fn solver_head() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Solve a board sent as space separated rows, e.g. `/solver/afr/deevn seuen ndlen`.
#[get("/solver/{lang}/{gridstring}")]
pub async fn solve_grid(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (lang, gridstring) = path.into_inner();
    let lang = lang.to_lowercase();

    let dictionary = match data.dictionaries.get(&lang) {
        Some(d) => d,
        None => {
            warn!("Word list for '{}' not loaded", lang);
            return HttpResponse::BadRequest().json(SolverResponse { data: Vec::new() });
        }
    };

    let rows: Vec<String> = gridstring
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let grid = match Grid::from_rows(&rows) {
        Ok(g) => g,
        Err(e) => {
            warn!("Rejected grid '{}' ({}): {}", gridstring, lang, e);
            return HttpResponse::BadRequest().json(SolverResponse { data: Vec::new() });
        }
    };

    let found = lookup(&grid, data.min_word_length, dictionary, data.result_cap);
    info!("Solved {}x{} grid ({}): {} words", grid.width(), grid.height(), lang, found.len());

    HttpResponse::Ok().json(SolverResponse {
        data: found.into_iter().map(|f| (f.word, f.path)).collect(),
    })
}

#[get("/langs")]
pub async fn get_langs(data: web::Data<AppState>) -> impl Responder {
    let mut langs: Vec<LangInfo> = data
        .dictionaries
        .iter()
        .map(|(code, words)| LangInfo {
            code: code.clone(),
            word_count: words.len(),
        })
        .collect();
    langs.sort_by(|a, b| a.code.cmp(&b.code));

    HttpResponse::Ok().json(langs)
}
