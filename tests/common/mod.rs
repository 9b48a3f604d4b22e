use std::error::Error;

use ldap3::LdapConnAsync;

pub const URL: &str = "ldap://localhost:1389";
pub const ADMIN_DN: &str = "cn=admin,dc=example,dc=org";
pub const ADMIN_PASSWORD: &str = "adminpassword";

pub async fn ldap_connect() -> Result<ldap3::Ldap, Box<dyn Error>> {
	let (conn, mut ldap) = LdapConnAsync::new(URL).await?;
	let _handle = tokio::spawn(async move {
		if let Err(err) = conn.drive().await {
			panic!("Ldap connection error {err}");
		}
	});
	ldap.simple_bind(ADMIN_DN, ADMIN_PASSWORD).await?.success()?;
	Ok(ldap)
}

pub async fn ldap_add_organizational_unit(
	ldap: &mut ldap3::Ldap,
	ou: &str,
) -> Result<(), Box<dyn Error>> {
	ldap.add(
		&format!("ou={},dc=example,dc=org", ou),
		vec![("objectClass", ["organizationalUnit"].into())],
	)
	.await?
	.success()?;
	Ok(())
}

pub async fn ldap_delete_organizational_unit(
	ldap: &mut ldap3::Ldap,
	ou: &str,
) -> Result<(), Box<dyn Error>> {
	ldap.delete(&format!("ou={},dc=example,dc=org", ou)).await?.success()?;
	Ok(())
}

pub async fn ldap_add_user(
	ldap: &mut ldap3::Ldap,
	ou: &str,
	cn: &str,
	mail: &[&str],
) -> Result<(), Box<dyn Error>> {
	ldap.add(
		&format!("cn={},ou={},dc=example,dc=org", cn, ou),
		vec![
			("objectClass", ["inetOrgPerson"].into()),
			("sn", [cn].into()),
			("mail", mail.iter().copied().collect()),
		],
	)
	.await?
	.success()?;
	Ok(())
}

pub async fn ldap_delete_user(
	ldap: &mut ldap3::Ldap,
	ou: &str,
	cn: &str,
) -> Result<(), Box<dyn Error>> {
	ldap.delete(&format!("cn={},ou={},dc=example,dc=org", cn, ou)).await?.success()?;
	Ok(())
}

/// Create `ou` holding one user per entry in `users`, removing leftovers of
/// earlier runs first.
pub async fn ldap_seed(
	ldap: &mut ldap3::Ldap,
	ou: &str,
	users: &[(&str, &[&str])],
) -> Result<(), Box<dyn Error>> {
	for (cn, _) in users {
		let _ = ldap_delete_user(ldap, ou, cn).await;
	}
	let _ = ldap_delete_organizational_unit(ldap, ou).await;

	ldap_add_organizational_unit(ldap, ou).await?;
	for (cn, mail) in users {
		ldap_add_user(ldap, ou, cn, mail).await?;
	}
	Ok(())
}

pub async fn ldap_cleanup(
	ldap: &mut ldap3::Ldap,
	ou: &str,
	users: &[(&str, &[&str])],
) -> Result<(), Box<dyn Error>> {
	for (cn, _) in users {
		ldap_delete_user(ldap, ou, cn).await?;
	}
	ldap_delete_organizational_unit(ldap, ou).await?;
	Ok(())
}
