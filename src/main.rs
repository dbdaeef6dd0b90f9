use macroquad::window::next_frame;

use mordicus::app::App;

#[macroquad::main("Mordicus")]
async fn main() {
    let mut app = App::new();
    while app.tick() {
        next_frame().await;
    }
}
