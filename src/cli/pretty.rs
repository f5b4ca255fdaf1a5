// JSON整形 - 空白だけを変えて再インデントする

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::value::RawValue;
use std::fmt;
use std::marker::PhantomData;

/// JSONを指定したインデントで整形する
///
/// スカラー値は元のテキストのまま書き出すので、数値の表記や文字列の
/// エスケープ、キーの順序と重複は入力どおりに残る。
pub fn indent(json: &[u8], indent: &[u8]) -> serde_json::Result<Vec<u8>> {
    let root: &RawValue = serde_json::from_slice(json)?;
    let tree = JsonTree::parse(root)?;

    let mut indented = Vec::with_capacity(json.len() * 2);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut indented, PrettyFormatter::with_indent(indent));
    tree.serialize(&mut serializer)?;
    Ok(indented)
}

/// 入力を借用したままのJSON木
enum JsonTree<'a> {
    Object(Vec<(String, JsonTree<'a>)>),
    Array(Vec<JsonTree<'a>>),
    Scalar(&'a RawValue),
}

impl<'a> JsonTree<'a> {
    fn parse(raw: &'a RawValue) -> serde_json::Result<Self> {
        match raw.get().as_bytes().first() {
            Some(b'{') => {
                let Entries(entries) = serde_json::from_str(raw.get())?;
                entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, Self::parse(value)?)))
                    .collect::<serde_json::Result<_>>()
                    .map(Self::Object)
            }
            Some(b'[') => {
                let items: Vec<&'a RawValue> = serde_json::from_str(raw.get())?;
                items
                    .into_iter()
                    .map(Self::parse)
                    .collect::<serde_json::Result<_>>()
                    .map(Self::Array)
            }
            _ => Ok(Self::Scalar(raw)),
        }
    }
}

impl Serialize for JsonTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Array(items) => serializer.collect_seq(items),
            Self::Scalar(raw) => raw.serialize(serializer),
        }
    }
}

/// 出現順のままのオブジェクトのエントリ
struct Entries<'a>(Vec<(String, &'a RawValue)>);

impl<'de> Deserialize<'de> for Entries<'de> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<'de>(PhantomData<&'de ()>);

impl<'de> Visitor<'de> for EntriesVisitor<'de> {
    type Value = Entries<'de>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, &'de RawValue>()? {
            entries.push((key, value));
        }
        Ok(Entries(entries))
    }
}
