use clap::Parser;
use odmap::app::{OdAppError, OdmapApp};

fn main() -> Result<(), OdAppError> {
    env_logger::init();
    let args = OdmapApp::parse();
    args.op.run(args.config.as_deref())
}
