mod allocator;

use padlock_rs::app::App;

fn main() -> anyhow::Result<()> {
    App::init()?.execute()
}
