use firesketch::{runner, scene};

fn main() {
    env_logger::init();
    log::info!("starting fire sketch");

    if let Err(e) = runner::run((640, 480), "Fire Effect", scene::fire) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
