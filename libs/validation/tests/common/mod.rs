//! Shared fixtures for validation integration tests
//!
//! A small mail domain (`MailSettings` listing `Server`s) and an
//! `Owner`/`Child` pair whose children point back at their owner. Every
//! hook call is appended to a per-thread journal so tests can assert the
//! exact order in which hooks ran.

#![allow(dead_code)]

use anyhow::anyhow;
use chrono::Duration;
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use traversal::{GraphNode, MemberInfo, MemberValue, NodeId, Shape, TypeInfo};
use validation::{HookFlow, HookResult, Validatable, ValidatableAndUpdatable, ValidationOutcome};

thread_local! {
    static JOURNAL: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn note(entry: String) {
    JOURNAL.with(|journal| journal.borrow_mut().push(entry));
}

/// Hook calls recorded since the last call, oldest first
pub fn journal() -> Vec<String> {
    JOURNAL.with(|journal| journal.borrow_mut().drain(..).collect())
}

pub struct MailSettings {
    pub host: Option<String>,
    pub port: u32,
    pub timeout: Option<String>,
    pub recipients: Vec<String>,
    pub servers: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behaviour {
    Normal,
    FailOnEnter,
    FailOnExit,
    PanicOnEnter,
    Abort(String),
}

pub struct Server {
    pub name: RefCell<String>,
    pub behaviour: Behaviour,
}

pub struct Owner {
    pub name: String,
    pub children: RefCell<Vec<Node>>,
    /// Validated on its own and folded in, never traversed
    pub detached: Option<Node>,
}

pub struct Child {
    pub name: String,
    pub owner: RefCell<Weak<Owner>>,
}

static MAIL_SETTINGS: Lazy<TypeInfo> = Lazy::new(|| {
    TypeInfo::of::<MailSettings>()
        .property("Host", Shape::leaf::<Option<String>>())
        .property("Port", Shape::leaf::<u32>())
        .property("Timeout", Shape::leaf::<Option<String>>())
        .property("Recipients", Shape::Enumerable)
        .property("Servers", Shape::Sequence)
});

static SERVER: Lazy<TypeInfo> =
    Lazy::new(|| TypeInfo::of::<Server>().property("Name", Shape::leaf::<String>()));

static OWNER: Lazy<TypeInfo> = Lazy::new(|| {
    TypeInfo::of::<Owner>()
        .property("Name", Shape::leaf::<String>())
        .property("Children", Shape::Sequence)
        .member(MemberInfo::field("detached", Shape::Opaque).private())
});

static CHILD: Lazy<TypeInfo> = Lazy::new(|| {
    TypeInfo::of::<Child>()
        .property("Name", Shape::leaf::<String>())
        .property("Owner", Shape::Node)
        .member(MemberInfo::field("owner", Shape::Node).private().back_reference())
});

#[derive(Clone)]
pub enum Node {
    Mail(Rc<MailSettings>),
    Server(Rc<Server>),
    Owner(Rc<Owner>),
    Child(Rc<Child>),
}

impl Node {
    pub fn server_name(&self) -> Option<String> {
        match self {
            Node::Server(server) => Some(server.name.borrow().clone()),
            _ => None,
        }
    }

    pub fn servers(&self) -> Vec<Node> {
        match self {
            Node::Mail(mail) => mail.servers.clone(),
            _ => Vec::new(),
        }
    }
}

impl GraphNode for Node {
    fn node_id(&self) -> NodeId {
        match self {
            Node::Mail(mail) => NodeId::of_rc(mail),
            Node::Server(server) => NodeId::of_rc(server),
            Node::Owner(owner) => NodeId::of_rc(owner),
            Node::Child(child) => NodeId::of_rc(child),
        }
    }

    fn type_info(&self) -> &'static TypeInfo {
        match self {
            Node::Mail(_) => &MAIL_SETTINGS,
            Node::Server(_) => &SERVER,
            Node::Owner(_) => &OWNER,
            Node::Child(_) => &CHILD,
        }
    }

    fn member_value(&self, member: &MemberInfo) -> MemberValue<Self> {
        match (self, member.name()) {
            (Node::Mail(mail), "Servers") => MemberValue::sequence(mail.servers.iter().cloned()),
            (Node::Owner(owner), "Children") => {
                MemberValue::sequence(owner.children.borrow().iter().cloned())
            }
            (Node::Child(child), "Owner") | (Node::Child(child), "owner") => {
                MemberValue::single(child.owner.borrow().upgrade().map(Node::Owner))
            }
            _ => MemberValue::Absent,
        }
    }
}

impl Validatable for Node {
    fn pre_structure_validation(&self, outcome: &mut ValidationOutcome) -> HookResult {
        match self {
            Node::Mail(mail) => {
                note("pre Mail".to_string());
                outcome.invalidate_if_null_or_white_space(mail.host.as_deref(), "Host");
                outcome.invalidate_if_out_of_range(mail.port, 1, 65535, "Port");
                outcome.parse_time_span_at_least(
                    mail.timeout.as_deref(),
                    "Timeout",
                    Duration::seconds(1),
                );
                outcome.invalidate_if_null_empty_or_duplicates(
                    Some(&mail.recipients[..]),
                    "Recipients",
                );
                Ok(HookFlow::Continue)
            }
            Node::Server(server) => {
                let name = server.name.borrow().clone();
                note(format!("pre Server {}", name));
                match &server.behaviour {
                    Behaviour::FailOnEnter => Err("server hook exploded".into()),
                    Behaviour::PanicOnEnter => panic!("server {} is unreachable", name),
                    Behaviour::Abort(reason) => Ok(HookFlow::abort(reason.clone())),
                    _ => {
                        outcome.invalidate_if_null_or_white_space(Some(&name), "Name");
                        Ok(HookFlow::Continue)
                    }
                }
            }
            Node::Owner(owner) => {
                note(format!("pre Owner {}", owner.name));
                if let Some(detached) = &owner.detached {
                    let sub = validation::validate(Some(detached), None)?;
                    outcome.integrate_sub_result(Some(&sub), Some("Detached"));
                }
                Ok(HookFlow::Continue)
            }
            Node::Child(child) => {
                note(format!("pre Child {}", child.name));
                outcome.invalidate_if_null_or_white_space(Some(&child.name), "Name");
                Ok(HookFlow::Continue)
            }
        }
    }

    fn post_structure_validation(&self, outcome: &mut ValidationOutcome) -> Option<HookResult> {
        match self {
            Node::Mail(mail) => {
                note("post Mail".to_string());
                outcome.invalidate_if(
                    mail.servers.is_empty(),
                    Some("Servers"),
                    "must list at least one server",
                );
                Some(Ok(HookFlow::Continue))
            }
            Node::Server(server) => {
                let name = server.name.borrow().clone();
                note(format!("post Server {}", name));
                if server.behaviour == Behaviour::FailOnExit {
                    return Some(Err(anyhow!("lost connection to {}", name).into()));
                }
                Some(Ok(HookFlow::Continue))
            }
            Node::Owner(owner) => {
                note(format!("post Owner {}", owner.name));
                Some(Ok(HookFlow::Continue))
            }
            Node::Child(_) => None,
        }
    }
}

impl ValidatableAndUpdatable for Node {
    fn pre_structure_validation_and_update(&self, outcome: &mut ValidationOutcome) -> HookResult {
        if let Node::Server(server) = self {
            let trimmed = server.name.borrow().trim().to_string();
            *server.name.borrow_mut() = trimmed;
        }
        self.pre_structure_validation(outcome)
    }

    fn post_structure_validation_and_update(
        &self,
        outcome: &mut ValidationOutcome,
    ) -> Option<HookResult> {
        self.post_structure_validation(outcome)
    }
}

pub fn server(name: &str) -> Node {
    server_with(name, Behaviour::Normal)
}

pub fn server_with(name: &str, behaviour: Behaviour) -> Node {
    Node::Server(Rc::new(Server {
        name: RefCell::new(name.to_string()),
        behaviour,
    }))
}

pub fn mail(
    host: Option<&str>,
    port: u32,
    timeout: Option<&str>,
    recipients: &[&str],
    servers: Vec<Node>,
) -> Node {
    Node::Mail(Rc::new(MailSettings {
        host: host.map(str::to_string),
        port,
        timeout: timeout.map(str::to_string),
        recipients: recipients.iter().map(|r| r.to_string()).collect(),
        servers,
    }))
}

/// Mail settings that pass every root-level rule
pub fn valid_mail(servers: Vec<Node>) -> Node {
    mail(
        Some("mail.example.com"),
        25,
        Some("00:00:30"),
        &["ops@example.com", "dev@example.com"],
        servers,
    )
}

/// Owner whose children each point back at it
pub fn family(owner: &str, children: &[&str], detached: Option<Node>) -> Node {
    let owner = Rc::new(Owner {
        name: owner.to_string(),
        children: RefCell::new(Vec::new()),
        detached,
    });

    let nodes = children
        .iter()
        .map(|name| {
            Node::Child(Rc::new(Child {
                name: name.to_string(),
                owner: RefCell::new(Rc::downgrade(&owner)),
            }))
        })
        .collect();
    *owner.children.borrow_mut() = nodes;

    Node::Owner(owner)
}
