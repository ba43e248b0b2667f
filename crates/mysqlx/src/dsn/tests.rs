use super::*;

#[test]
fn parses_classic_tcp_form() {
    let dsn = Dsn::parse("app:s3cret@tcp(db.internal:3307)/shop?charset=utf8mb4").unwrap();
    assert_eq!(dsn.user.as_deref(), Some("app"));
    assert_eq!(dsn.password.as_deref(), Some("s3cret"));
    assert_eq!(
        dsn.net,
        Net::Tcp {
            host: "db.internal".into(),
            port: 3307
        }
    );
    assert_eq!(dsn.database.as_deref(), Some("shop"));
    assert_eq!(dsn.param("charset"), Some("utf8mb4"));
}

#[test]
fn password_may_contain_separators() {
    let dsn = Dsn::parse("app:p@ss:w/rd@tcp(localhost:3306)/shop").unwrap();
    assert_eq!(dsn.user.as_deref(), Some("app"));
    assert_eq!(dsn.password.as_deref(), Some("p@ss:w/rd"));
    assert_eq!(dsn.database.as_deref(), Some("shop"));
}

#[test]
fn password_may_contain_question_mark() {
    let dsn = Dsn::parse("app:pa?ss@tcp(db:3306)/shop?charset=utf8mb4").unwrap();
    assert_eq!(dsn.password.as_deref(), Some("pa?ss"));
    assert_eq!(dsn.database.as_deref(), Some("shop"));
    assert_eq!(dsn.param("charset"), Some("utf8mb4"));
    assert_eq!(
        dsn.net,
        Net::Tcp {
            host: "db".into(),
            port: 3306
        }
    );
}

#[test]
fn user_without_password() {
    let dsn = Dsn::parse("root@tcp(localhost)/shop").unwrap();
    assert_eq!(dsn.user.as_deref(), Some("root"));
    assert_eq!(dsn.password, None);
    assert_eq!(
        dsn.net,
        Net::Tcp {
            host: "localhost".into(),
            port: DEFAULT_PORT
        }
    );
}

#[test]
fn bare_database_uses_default_address() {
    let dsn = Dsn::parse("/shop").unwrap();
    assert_eq!(dsn.user, None);
    assert_eq!(dsn.net, Net::default());
    assert_eq!(dsn.database.as_deref(), Some("shop"));

    let dsn = Dsn::parse("app:pw@tcp/shop").unwrap();
    assert_eq!(dsn.net, Net::default());
}

#[test]
fn unix_socket() {
    let dsn = Dsn::parse("app@unix(/var/run/mysqld/mysqld.sock)/shop").unwrap();
    assert_eq!(
        dsn.net,
        Net::Unix(PathBuf::from("/var/run/mysqld/mysqld.sock"))
    );
}

#[test]
fn ipv6_host() {
    let dsn = Dsn::parse("app@tcp([::1]:3310)/shop").unwrap();
    assert_eq!(
        dsn.net,
        Net::Tcp {
            host: "::1".into(),
            port: 3310
        }
    );
    assert_eq!(dsn.to_string(), "app@tcp([::1]:3310)/shop");
}

#[test]
fn empty_database_is_none() {
    let dsn = Dsn::parse("app@tcp(localhost:3306)/").unwrap();
    assert_eq!(dsn.database, None);
}

#[test]
fn params_are_percent_decoded_in_order() {
    let dsn = Dsn::parse("/shop?loc=Asia%2FShanghai&parseTime=true").unwrap();
    assert_eq!(
        dsn.params,
        vec![
            ("loc".to_string(), "Asia/Shanghai".to_string()),
            ("parseTime".to_string(), "true".to_string()),
        ]
    );
}

#[test]
fn rejects_malformed_input() {
    for bad in [
        "app@tcp(localhost:3306)",
        "app@tcp(localhost:notaport)/shop",
        "app@tcp(localhost:3306/shop",
        "app@udp(localhost:3306)/shop",
        "app@unix()/shop",
        "app@tcp([::1:3306)/shop",
    ] {
        let err = Dsn::parse(bad).unwrap_err();
        assert!(matches!(err, DbError::Dsn(_)), "{bad}: {err}");
    }
}

#[test]
fn display_and_debug_hide_the_password() {
    let dsn = Dsn::parse("app:s3cret@tcp(db:3306)/shop").unwrap();
    assert_eq!(dsn.to_string(), "app:***@tcp(db:3306)/shop");
    assert!(!format!("{dsn:?}").contains("s3cret"));
}

#[test]
fn builds_connect_options() {
    let dsn = Dsn::parse("app:pw@tcp(db:3306)/shop?charset=utf8mb4,utf8&collation=utf8mb4_bin&tls=false&timeout=5s")
        .unwrap();
    assert!(dsn.to_connect_options().is_ok());
}

#[test]
fn tls_modes() {
    assert!(matches!(parse_tls("true"), Ok(MySqlSslMode::VerifyIdentity)));
    assert!(matches!(parse_tls("skip-verify"), Ok(MySqlSslMode::Required)));
    assert!(matches!(parse_tls("PREFERRED"), Ok(MySqlSslMode::Preferred)));
    assert!(matches!(parse_tls("false"), Ok(MySqlSslMode::Disabled)));
    assert!(parse_tls("custom-profile").is_err());
}

#[test]
fn accepts_url_form() {
    assert!(connect_options("mysql://app:pw@localhost:3306/shop").is_ok());
    assert!(connect_options("app:pw@tcp(localhost:3306)/shop").is_ok());
    assert!(connect_options("app:pw@bogus(localhost)/shop").is_err());
}

#[test]
fn redacts_both_forms() {
    assert_eq!(
        redact("app:s3cret@tcp(db:3306)/shop"),
        "app:***@tcp(db:3306)/shop"
    );
    let url = redact("mysql://app:s3cret@db:3306/shop");
    assert!(!url.contains("s3cret"));
    assert!(url.contains("app:***@db"));
}
