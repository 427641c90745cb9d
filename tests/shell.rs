use rankedset::command::{command, List};
use rankedset::response::Response;
use rankedset::Options;

fn run(list: &mut List, line: &str) -> Response {
    let args = line.split_whitespace().map(|s| s.to_owned()).collect::<Vec<_>>();
    command(&args, list)
}

#[test]
fn session() {
    let mut list = List::with_options(Options::new().seed(8)).unwrap();
    for line in ["insert a 10", "insert b 5", "insert c 10 fromtail", "insert a 2"].iter() {
        assert_eq!(run(&mut list, line), Response::Status("OK".to_owned()));
    }
    assert_eq!(run(&mut list, "len"), Response::Integer(4));
    assert_eq!(
        run(&mut list, "dump"),
        Response::Status("[[\"a\", 2, 0], [\"b\", 5, 1], [\"a\", 10, 2], [\"c\", 10, 3]]".to_owned())
    );
    assert_eq!(
        run(&mut list, "delvalue a withranks"),
        Response::Array(vec![
            Response::Array(vec![
                Response::Data("a".to_owned()),
                Response::Float(10.0),
                Response::Integer(2),
            ]),
            Response::Array(vec![
                Response::Data("a".to_owned()),
                Response::Float(2.0),
                Response::Integer(0),
            ]),
        ])
    );
    assert_eq!(run(&mut list, "check"), Response::Status("OK".to_owned()));
    assert_eq!(run(&mut list, "count -inf inf fromtail"), Response::Integer(2));
    assert_eq!(
        run(&mut list, "getrank 0 -1").to_string(),
        "1) \"b\"\n2) \"c\""
    );
}
