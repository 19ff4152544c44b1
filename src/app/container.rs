use std::sync::Arc;

use crate::adapters::toml_config::ToolPaths;
use crate::adapters::{FFmpegAdapter, FFprobeAdapter, HostEnvAdapter};
use crate::app::encode_interactor::EncodeInteractor;
use crate::ports::{EnvPort, ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn encode_interactor(&self) -> Arc<EncodeInteractor>;
}

pub struct DefaultAppContainer {
    encode_interactor: Arc<EncodeInteractor>,
}

impl DefaultAppContainer {
    pub fn new(tools: &ToolPaths) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(tools.ffprobe.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new(tools.ffmpeg.clone()));
        let env_port = Arc::new(HostEnvAdapter::new());

        let encode_interactor = Arc::new(EncodeInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            env_port as Arc<dyn EnvPort>,
        ));

        Self { encode_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn encode_interactor(&self) -> Arc<EncodeInteractor> {
        Arc::clone(&self.encode_interactor)
    }
}
