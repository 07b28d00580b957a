fn main() {
    hrm::term::main()
}
