use crate::common::helpers::validate;
use crate::common::types::CommonError;
use crate::config::{App, Config, Parser};
use crate::rpc::Manager;
use crate::DbBuilder;

/// `LineageRPC` is the daemon-facing entrypoint: parse and validate the
/// config file, open the graph database, and assemble the RPC processor with
/// every route registered
pub struct LineageRPC {
    config: Config,
}

impl LineageRPC {
    pub fn new(conf_file: &str) -> Result<Self, CommonError> {
        let config = Parser::new(conf_file.to_string())
            .parse()
            .map_err(|err| CommonError::ConfigError(err.to_string()))?;

        let _ = validate(config.clone())?;

        Ok(Self { config })
    }

    pub fn build_app_config(&self) -> App {
        self.config.app().to_owned()
    }

    pub async fn build_rpc_graph(&self) -> Result<Manager, CommonError> {
        let mut db_builder = DbBuilder::new(self.config.clone());
        let db_executor = db_builder.build(|conf| {
            let opts_db_graph = conf.db().graph.clone();

            let opts_db_common = opts_db_graph.get_common();
            let opts_db_main = opts_db_graph.get_db_options();

            (opts_db_common, opts_db_main)
        })?;

        let mut manager = Manager::new();
        let _ = manager
            .build_graph_service(
                db_executor,
                self.config.oracle().to_owned(),
                self.config.policy().to_owned(),
            )
            .await?;

        Ok(manager)
    }
}
