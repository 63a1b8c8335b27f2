// example/src/main.rs
//
// Decodes a pblite payload with the code checked in at src/generated.rs,
// which was produced by:
//
//     pblitec example/contact.proto --output example/src/generated.rs

mod generated;

use pblite::{Message, PbliteError};

use generated::{ContactList, PhoneNumber};

fn main() -> Result<(), PbliteError> {
    // Field values sit at position (field number - 1); a Hangouts-style
    // producer stringifies uint64 and sends enums as bare numbers.
    let payload =
        r#"[[["16067624137",["CA",1,123]],["442071838750",null]],"9007199254740993",7]"#;

    let contacts = ContactList::from_pblite(payload)?;

    println!("revision     = {:?}", contacts.revision);
    // 7 has no declared variant, so this falls back to PhoneTypeUnknown
    println!("default type = {:?}", contacts.default_type);

    for (i, number) in contacts
        .numbers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        println!(
            "numbers[{}]   = {} (region {:?})",
            i,
            number.e164,
            number
                .i18n_data
                .as_ref()
                .and_then(|data| data.region_code.as_deref())
        );
    }

    let single = PhoneNumber::from_pblite(r#"["16067624137",["CA",1,123]]"#)?;
    match serde_json::to_string(&single) {
        Ok(json) => println!("as json      = {}", json),
        Err(err) => eprintln!("serialize failed: {}", err),
    }

    Ok(())
}
