#![allow(dead_code)]

use github_star_steps::{ClientConfig, StarStateClient};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

type Repositories = Arc<Mutex<HashMap<String, Vec<String>>>>;

/// In-memory stand-in for the parts of the GitHub API that starring touches.
///
/// One account (`login`, `token`) is recognised; every other credential gets
/// a 401. Repositories are keyed by `owner/name` and keep their stargazers in
/// insertion order so pagination is deterministic.
pub struct FakeGitHub {
    pub server: MockServer,
    pub login: String,
    pub token: String,
    repositories: Repositories,
}

impl FakeGitHub {
    pub async fn start(login: &str, token: &str) -> Self {
        Self::start_with_link_headers(login, token, true).await
    }

    /// `link_headers = false` omits `Link` so clients must fall back to page size.
    pub async fn start_with_link_headers(login: &str, token: &str, link_headers: bool) -> Self {
        let server = MockServer::start().await;
        let repositories: Repositories = Arc::default();
        let auth = format!("token {}", token);

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", auth.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": login,
                "id": 1,
                "name": null,
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path_regex(r"^/user/starred/[^/]+/[^/]+$"))
            .and(header("authorization", auth.as_str()))
            .respond_with(StarResponder {
                repositories: repositories.clone(),
                login: login.to_string(),
                star: true,
            })
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path_regex(r"^/user/starred/[^/]+/[^/]+$"))
            .and(header("authorization", auth.as_str()))
            .respond_with(StarResponder {
                repositories: repositories.clone(),
                login: login.to_string(),
                star: false,
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/user/starred/[^/]+/[^/]+$"))
            .and(header("authorization", auth.as_str()))
            .respond_with(StarredProbeResponder {
                repositories: repositories.clone(),
                login: login.to_string(),
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/repos/[^/]+/[^/]+/stargazers$"))
            .and(header("authorization", auth.as_str()))
            .respond_with(StargazersResponder {
                repositories: repositories.clone(),
                link_headers,
            })
            .mount(&server)
            .await;

        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
            })))
            .with_priority(u8::MAX)
            .mount(&server)
            .await;

        FakeGitHub {
            server,
            login: login.to_string(),
            token: token.to_string(),
            repositories,
        }
    }

    /// Creates `login/name` with the given stargazers.
    pub fn add_repository(&self, name: &str, stargazers: &[&str]) {
        let key = format!("{}/{}", self.login, name);
        let logins = stargazers.iter().map(|s| s.to_string()).collect();
        self.repositories.lock().unwrap().insert(key, logins);
    }

    pub fn stargazers(&self, name: &str) -> Vec<String> {
        let key = format!("{}/{}", self.login, name);
        self.repositories
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self, per_page: u32) -> StarStateClient {
        StarStateClient::new(ClientConfig {
            api_url: self.uri(),
            per_page,
            ..Default::default()
        })
        .expect("Failed to create client")
    }
}

/// `(owner, repo)` from the last two path segments.
fn repository_key(request: &Request, skip_tail: usize) -> String {
    let segments: Vec<&str> = request
        .url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();
    let end = segments.len() - skip_tail;
    format!("{}/{}", segments[end - 2], segments[end - 1])
}

struct StarResponder {
    repositories: Repositories,
    login: String,
    star: bool,
}

impl Respond for StarResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let key = repository_key(request, 0);
        let mut repositories = self.repositories.lock().unwrap();

        let Some(stargazers) = repositories.get_mut(&key) else {
            return ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" }));
        };

        let position = stargazers.iter().position(|l| *l == self.login);
        match (self.star, position) {
            (true, None) => stargazers.push(self.login.clone()),
            (false, Some(index)) => {
                stargazers.remove(index);
            }
            _ => {}
        }

        ResponseTemplate::new(204)
    }
}

struct StarredProbeResponder {
    repositories: Repositories,
    login: String,
}

impl Respond for StarredProbeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let key = repository_key(request, 0);
        let repositories = self.repositories.lock().unwrap();

        match repositories.get(&key) {
            Some(stargazers) if stargazers.contains(&self.login) => ResponseTemplate::new(204),
            _ => ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })),
        }
    }
}

struct StargazersResponder {
    repositories: Repositories,
    link_headers: bool,
}

impl Respond for StargazersResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let key = repository_key(request, 1);
        let repositories = self.repositories.lock().unwrap();

        let Some(stargazers) = repositories.get(&key) else {
            return ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" }));
        };

        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let per_page: usize = query.get("per_page").and_then(|v| v.parse().ok()).unwrap_or(30);
        let page: usize = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);

        let start = (page - 1) * per_page;
        let users: Vec<_> = stargazers
            .iter()
            .enumerate()
            .skip(start)
            .take(per_page)
            .map(|(index, login)| {
                json!({
                    "login": login,
                    "id": index + 1,
                    "avatar_url": null,
                    "html_url": format!("https://github.com/{}", login),
                })
            })
            .collect();

        let mut response = ResponseTemplate::new(200)
            .set_body_json(users)
            .insert_header("X-RateLimit-Remaining", "4999")
            .insert_header("X-RateLimit-Limit", "5000");

        if self.link_headers {
            let page_url = |page: usize| {
                format!(
                    "<{}/repos/{}/stargazers?per_page={}&page={}>",
                    request.url.origin().ascii_serialization(),
                    key,
                    per_page,
                    page
                )
            };
            let link = if start + per_page < stargazers.len() {
                format!("{}; rel=\"next\"", page_url(page + 1))
            } else {
                format!("{}; rel=\"first\"", page_url(1))
            };
            response = response.insert_header("Link", link.as_str());
        }

        response
    }
}
