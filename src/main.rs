fn main() {
    space_shooter::game::run();
}
