use crate::bridge::model::SurveyModel;
use crate::generator::grid::{build_network, GeneratorConfig};
use crate::workflow::runner::Runner;
use anyhow::Result;
use autosensecore::pipeline::CancelFlag;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9100))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that serves the latest survey snapshot and accepts generator
/// configs to run new surveys.
pub struct SurveyBridge {
    state: Arc<RwLock<SurveyModel>>,
}

impl SurveyBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(SurveyModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("results")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<SurveyModel>>| warp::reply::json(&*state.read().unwrap()));

        let survey_route = warp::path("survey")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig,
                 state: Arc<RwLock<SurveyModel>>,
                 runner: Arc<Runner>| async move {
                    let outcome = match build_network(&config) {
                        Ok(network) => runner
                            .execute_async(&network, CancelFlag::new())
                            .await
                            .map_err(|err| err.to_string()),
                        Err(err) => Err(err.to_string()),
                    };
                    match outcome {
                        Ok(result) => {
                            let model =
                                SurveyModel::from_result(&result, config.scenario.clone());
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            if let Some(name) = config.scenario.as_ref() {
                                println!(
                                    "[bridge] scenario {} -> {} classified of {}",
                                    name, result.classified, result.point_count
                                );
                            }
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "points": result.point_count,
                                    "classified": result.classified,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("survey error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(survey_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &SurveyModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[bridge] points: {}, classified: {}",
            guard.point_count, guard.classified
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> SurveyModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::SurveyConfig;
    use std::sync::Arc;

    #[test]
    fn bridge_updates_state_on_publish() {
        let config = SurveyConfig::from_args(4, 300.0, 0.1, 3);
        let runner = Arc::new(Runner::new(config));
        let bridge = SurveyBridge::new(runner.clone());

        let network = build_network(&GeneratorConfig::default()).unwrap();
        let result = runner.execute(&network).unwrap();
        let model = SurveyModel::from_result(&result, Some("smoke".into()));
        bridge.publish(&model).unwrap();
        assert_eq!(bridge.snapshot().point_count, result.point_count);
        assert_eq!(bridge.snapshot().scenario.as_deref(), Some("smoke"));
    }
}
