use flowdeck::{Config, EditorBuilder, NodeDescriptor, Position};

#[tokio::main]
async fn main() {
    let config = match std::env::var("FLOWDECK_CONFIG") {
        Ok(path) => Config::create(path).unwrap(),
        Err(_) => Config::default(),
    };
    let mut editor = EditorBuilder::new().config(config).build().unwrap();

    for template in editor.templates().list() {
        println!("[{}] {} - {}", template.category, template.id, template.name);
    }

    editor.load_template("welcome-email");
    let graph = editor.graph_mut();
    let last = graph.nodes().last().map(|n| n.id.clone()).unwrap();
    let slack = graph.add_node(NodeDescriptor::new("slack", "Tell the team"), Position::new(850.0, 200.0));
    graph.on_connect(flowdeck::Connection::new(last, slack.id));

    println!("{}", editor.graph().schema());
    println!("{}", editor.compile().to_json_pretty().unwrap());

    if std::env::var("FLOWDECK_CONFIG").is_ok() {
        match editor.save().await {
            Ok(id) => println!("Saved as {}", id),
            Err(e) if e.is_auth_required() => println!("Engine rejected the api key, update [engine.auth] and retry"),
            Err(e) => println!("Save failed: {}", e),
        }
    }
}
